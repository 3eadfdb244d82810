mod common;
mod jobs_tests;
mod primary_tests;
