//! Unit tests for the Graph mail module.


use std::path::Path;

use crate::config::MailConfig;
use crate::error_log::ErrorLog;
use crate::mail_api::GraphMailApi;

pub(super) const SENDER: &str = "reports@example.com";

/// Creates a GraphMailApi whose Graph and login endpoints live on the mock
/// server, logging errors into `log_dir`.
pub(super) fn api_with_mock(mock_uri: &str, log_dir: &Path) -> GraphMailApi {
    let config = MailConfig {
        tenant_id: "tenant-1".to_string(),
        client_id: "client-1".to_string(),
        client_secret: "shh".to_string(),
        sender: SENDER.to_string(),
        recipients: vec!["ops@example.com".to_string()],
        graph_base_url: format!("{mock_uri}/v1.0"),
        login_base_url: mock_uri.to_string(),
    };
    GraphMailApi::new(&config, ErrorLog::new(log_dir.join("error_log.txt")))
}
