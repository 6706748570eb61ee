pub mod dto;
pub mod json_tree_repository;
pub mod notify_config;
pub mod paths;
pub mod postal_client;
pub mod webhook_notifier;

pub use crate::json_tree_repository::FileTreeRepository;
pub use crate::notify_config::NotifyConfig;
pub use crate::postal_client::ZipcloudPostalLookup;
pub use crate::webhook_notifier::WebhookNotifier;
