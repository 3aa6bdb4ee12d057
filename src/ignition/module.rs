//! Catalog of the standard modules shipped with the Ignition image.
//!
//! Variants are declared in identifier order. `Ord` follows declaration order,
//! so a `BTreeSet<GatewayModule>` iterates alphabetically by identifier and
//! `GATEWAY_MODULES_ENABLED` renders the same way on every run.

/// A standard Ignition module that can be enabled at gateway startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GatewayModule {
    /// Alarm Notification
    AlarmNotification,
    /// Allen-Bradley Drivers
    AllenBradleyDrivers,
    /// BACnet Driver
    BacnetDriver,
    /// DNP3 Driver
    Dnp3Driver,
    /// DNP3 Driver v2
    Dnp3DriverV2,
    /// Enterprise Administration (EAM)
    EnterpriseAdministration,
    /// IEC 61850 Driver
    Iec61850Driver,
    /// Logix Driver
    LogixDriver,
    /// Micro800 Driver
    Micro800Driver,
    /// Mitsubishi Driver
    MitsubishiDriver,
    /// Modbus Driver v2
    ModbusDriverV2,
    /// Omron Driver
    OmronDriver,
    /// OPC UA server and client
    OpcUa,
    /// Perspective
    Perspective,
    /// Reporting
    Reporting,
    /// Client serial support
    SerialSupportClient,
    /// Gateway serial support
    SerialSupportGateway,
    /// Sequential Function Charts
    Sfc,
    /// Siemens Drivers
    SiemensDrivers,
    /// SMS Notification
    SmsNotification,
    /// SQL Bridge
    SqlBridge,
    /// Symbol Factory
    SymbolFactory,
    /// Tag Historian
    TagHistorian,
    /// UDP and TCP Drivers
    UdpTcpDrivers,
    /// Vision
    Vision,
    /// Voice Notification
    VoiceNotification,
    /// Web Browser
    WebBrowser,
    /// Web Development (WebDev)
    WebDeveloper,
}

impl GatewayModule {
    /// Every module in the catalog, in declaration order.
    pub const ALL: [GatewayModule; 28] = [
        Self::AlarmNotification,
        Self::AllenBradleyDrivers,
        Self::BacnetDriver,
        Self::Dnp3Driver,
        Self::Dnp3DriverV2,
        Self::EnterpriseAdministration,
        Self::Iec61850Driver,
        Self::LogixDriver,
        Self::Micro800Driver,
        Self::MitsubishiDriver,
        Self::ModbusDriverV2,
        Self::OmronDriver,
        Self::OpcUa,
        Self::Perspective,
        Self::Reporting,
        Self::SerialSupportClient,
        Self::SerialSupportGateway,
        Self::Sfc,
        Self::SiemensDrivers,
        Self::SmsNotification,
        Self::SqlBridge,
        Self::SymbolFactory,
        Self::TagHistorian,
        Self::UdpTcpDrivers,
        Self::Vision,
        Self::VoiceNotification,
        Self::WebBrowser,
        Self::WebDeveloper,
    ];

    /// Identifier understood by `GATEWAY_MODULES_ENABLED`.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::AlarmNotification => "alarm-notification",
            Self::AllenBradleyDrivers => "allen-bradley-drivers",
            Self::BacnetDriver => "bacnet-driver",
            Self::Dnp3Driver => "dnp3-driver",
            Self::Dnp3DriverV2 => "dnp3-driver-v2",
            Self::EnterpriseAdministration => "enterprise-administration",
            Self::Iec61850Driver => "iec-61850-driver",
            Self::LogixDriver => "logix-driver",
            Self::Micro800Driver => "micro800-driver",
            Self::MitsubishiDriver => "mitsubishi-driver",
            Self::ModbusDriverV2 => "modbus-driver-v2",
            Self::OmronDriver => "omron-driver",
            Self::OpcUa => "opc-ua",
            Self::Perspective => "perspective",
            Self::Reporting => "reporting",
            Self::SerialSupportClient => "serial-support-client",
            Self::SerialSupportGateway => "serial-support-gateway",
            Self::Sfc => "sfc",
            Self::SiemensDrivers => "siemens-drivers",
            Self::SmsNotification => "sms-notification",
            Self::SqlBridge => "sql-bridge",
            Self::SymbolFactory => "symbol-factory",
            Self::TagHistorian => "tag-historian",
            Self::UdpTcpDrivers => "udp-tcp-drivers",
            Self::Vision => "vision",
            Self::VoiceNotification => "voice-notification",
            Self::WebBrowser => "web-browser",
            Self::WebDeveloper => "web-developer",
        }
    }
}

impl std::fmt::Display for GatewayModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

impl std::str::FromStr for GatewayModule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|module| module.identifier() == s)
            .ok_or_else(|| format!("unknown module identifier '{}'", s))
    }
}

/// Join module identifiers with commas, no padding and no trailing separator.
pub(crate) fn join_identifiers<'a>(
    modules: impl IntoIterator<Item = &'a GatewayModule>,
) -> String {
    modules
        .into_iter()
        .map(GatewayModule::identifier)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_catalog_is_declared_in_identifier_order() {
        let identifiers: Vec<_> = GatewayModule::ALL.iter().map(|m| m.identifier()).collect();
        let mut sorted = identifiers.clone();
        sorted.sort_unstable();
        assert_eq!(identifiers, sorted);
    }

    #[test]
    fn test_identifiers_round_trip_through_from_str() {
        for module in GatewayModule::ALL {
            assert_eq!(module.identifier().parse::<GatewayModule>(), Ok(module));
        }
        assert!("opc_ua".parse::<GatewayModule>().is_err());
    }

    #[test]
    fn test_join_identifiers() {
        let modules = BTreeSet::from([GatewayModule::Perspective, GatewayModule::OpcUa]);
        assert_eq!(join_identifiers(&modules), "opc-ua,perspective");
        assert_eq!(join_identifiers(&BTreeSet::new()), "");
    }
}
