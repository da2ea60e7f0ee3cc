pub mod date_time;
