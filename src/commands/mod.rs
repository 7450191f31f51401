pub mod feedback;
pub mod heatmap;
pub mod init;
pub mod issues;
pub mod locations;
pub mod login;
pub mod report;
pub mod summary;
pub mod update;
