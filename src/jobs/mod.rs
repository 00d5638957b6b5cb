pub mod analytics_refresh_job;
