//! The devnet binary's script, run to completion.

use link_runtime::devnet::DEVNET_OWNER;
use link_runtime::{run_devnet, DevnetOptions, LinksConfig};
use shared_types::LinkEvent;
use std::time::Duration;

#[tokio::test]
async fn test_devnet_script_with_bincode_storage() {
    let mut config = LinksConfig::default();
    config.storage.codec = "bincode".to_string();
    let options = DevnetOptions {
        block_interval: Duration::from_millis(1),
        blocks: 4,
        ..DevnetOptions::default()
    };

    let report = run_devnet(config, options).await.unwrap();
    assert_eq!(report.blocks.len(), 4);
    assert!(report.events().any(|e| matches!(
        e,
        LinkEvent::ChainLinkSaved { user, .. } if user == DEVNET_OWNER
    )));
    assert!(report.events().any(|e| matches!(
        e,
        LinkEvent::ApplicationLinkStateChanged { to, .. } if to == "verification_success"
    )));
    assert!(report.blocks.iter().all(|b| b.swept == 0));
}
