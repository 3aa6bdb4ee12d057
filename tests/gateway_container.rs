//! Gateway startup tests against a real Docker daemon.
//!
//! Run with: `cargo test --test gateway_container -- --ignored`
//!
//! The image comes from `IGNITION_TEST_IMAGE` (see `FixtureConfig`); the first
//! run pulls it, which takes a while.

use testcontainers_ignition::testing::init_tracing;
use testcontainers_ignition::{GatewayEdition, GatewayModule, IgnitionContainer, IgnitionError};

async fn status_ping(base_url: &str) -> String {
    reqwest::get(format!("{base_url}/StatusPing"))
        .await
        .expect("StatusPing request failed")
        .text()
        .await
        .expect("StatusPing body unreadable")
}

#[tokio::test]
#[ignore = "requires Docker and pulls the Ignition gateway image"]
async fn test_gateway_reports_running() {
    init_tracing();

    let mut container = IgnitionContainer::from_env().expect("fixture config");
    container.config_mut().unwrap().accept_license().unwrap();

    let gateway = container.start().await.expect("gateway start");
    let url = gateway.gateway_url().await.unwrap();

    let body = status_ping(&url).await;
    assert!(body.contains(r#""state":"RUNNING""#), "unexpected body: {body}");
    assert_eq!(gateway.username(), "admin");

    gateway.stop().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker and pulls the Ignition gateway image"]
async fn test_maker_gateway_with_opc_ua() {
    init_tracing();

    let mut container = IgnitionContainer::from_env().expect("fixture config");
    container
        .config_mut()
        .unwrap()
        .accept_license()
        .unwrap()
        .with_edition(GatewayEdition::Maker)
        .unwrap()
        .with_modules([GatewayModule::OpcUa, GatewayModule::Perspective])
        .unwrap()
        .with_gateway_name("maker-under-test")
        .unwrap()
        .with_additional_args(["-Dignition.allowunsignedmodules=true"])
        .unwrap();

    let gateway = container.start().await.expect("gateway start");

    let opc_ua = gateway.opc_ua_url().await.unwrap();
    assert!(opc_ua.starts_with("opc.tcp://"));
    assert!(gateway.opc_ua_discovery_url().await.unwrap().ends_with("/discovery"));

    // Debug mode was not enabled, so port 8000 is not exposed.
    assert!(matches!(
        gateway.mapped_debug_port().await,
        Err(IgnitionError::PortNotExposed { port: 8000 })
    ));

    let body = status_ping(&gateway.gateway_url().await.unwrap()).await;
    assert!(body.contains("RUNNING"), "unexpected body: {body}");
}

#[tokio::test]
#[ignore = "requires Docker and pulls the Ignition gateway image"]
async fn test_custom_http_port_is_mapped() {
    init_tracing();

    let mut container = IgnitionContainer::from_env().expect("fixture config");
    container
        .config_mut()
        .unwrap()
        .accept_license()
        .unwrap()
        .with_http_port(9088)
        .unwrap();

    let gateway = container.start().await.expect("gateway start");
    let mapped = gateway.mapped_gateway_port().await.unwrap();
    assert_eq!(mapped, gateway.mapped_port(9088).await.unwrap());

    let body = status_ping(&gateway.gateway_url().await.unwrap()).await;
    assert!(body.contains("RUNNING"), "unexpected body: {body}");
}
