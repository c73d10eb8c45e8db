pub mod config;
pub mod edit;
pub mod new;
pub mod run;
pub mod shell;
