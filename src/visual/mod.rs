pub mod dispatch;
pub mod followers;
pub mod plugin;
pub mod regions;
