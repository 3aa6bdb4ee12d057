//! Gateway Network (GAN) settings.
//!
//! Rendered into the `GATEWAY_NETWORK*` environment block. Every field is
//! optional and only fields that were set reach the container.

/// Policy for accepting incoming gateway network connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityPolicy {
    /// Incoming connections must be approved.
    ApproveOnly,
    /// Only gateways on the whitelist may connect.
    SpecifiedList,
    /// Any gateway may connect.
    Unrestricted,
}

impl SecurityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApproveOnly => "ApproveOnly",
            Self::SpecifiedList => "SpecifiedList",
            Self::Unrestricted => "Unrestricted",
        }
    }
}

impl std::fmt::Display for SecurityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing connection to another gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingConnection {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Milliseconds between pings.
    pub ping_rate: Option<u32>,
    pub ping_max_missed: Option<u32>,
    pub enabled: Option<bool>,
    pub enable_ssl: Option<bool>,
    /// Milliseconds.
    pub websocket_timeout: Option<u32>,
    pub description: Option<String>,
}

impl OutgoingConnection {
    /// Connection to `host:port` with every other setting left to the gateway.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: Some(host.into()),
            port: Some(port),
            ..Default::default()
        }
    }

    pub fn with_ping_rate(mut self, millis: u32) -> Self {
        self.ping_rate = Some(millis);
        self
    }

    pub fn with_ping_max_missed(mut self, count: u32) -> Self {
        self.ping_max_missed = Some(count);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_ssl(mut self, enable_ssl: bool) -> Self {
        self.enable_ssl = Some(enable_ssl);
        self
    }

    pub fn with_websocket_timeout(mut self, millis: u32) -> Self {
        self.websocket_timeout = Some(millis);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn env_vars(&self, index: usize) -> Vec<(String, String)> {
        let key = |suffix: &str| format!("GATEWAY_NETWORK_{index}_{suffix}");
        let mut env = Vec::new();
        push_opt(&mut env, key("HOST"), self.host.as_ref());
        push_opt(&mut env, key("PORT"), self.port);
        push_opt(&mut env, key("PINGRATE"), self.ping_rate);
        push_opt(&mut env, key("PINGMAXMISSED"), self.ping_max_missed);
        push_opt(&mut env, key("ENABLED"), self.enabled);
        push_opt(&mut env, key("ENABLESSL"), self.enable_ssl);
        push_opt(&mut env, key("WEBSOCKETTIMEOUT"), self.websocket_timeout);
        push_opt(&mut env, key("DESCRIPTION"), self.description.as_ref());
        env
    }
}

/// Gateway network configuration block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayNetworkConfig {
    pub enabled: Option<bool>,
    pub require_ssl: Option<bool>,
    pub require_two_way_auth: Option<bool>,
    pub send_threads: Option<u32>,
    pub receive_threads: Option<u32>,
    pub receive_max: Option<u32>,
    pub allow_incoming: Option<bool>,
    pub security_policy: Option<SecurityPolicy>,
    /// Gateway names accepted under [`SecurityPolicy::SpecifiedList`].
    pub whitelist: Vec<String>,
    pub allowed_proxy_hops: Option<u32>,
    /// Milliseconds.
    pub websocket_session_idle_timeout: Option<u32>,
    pub outgoing: Vec<OutgoingConnection>,
}

impl GatewayNetworkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_require_ssl(mut self, require_ssl: bool) -> Self {
        self.require_ssl = Some(require_ssl);
        self
    }

    pub fn with_require_two_way_auth(mut self, required: bool) -> Self {
        self.require_two_way_auth = Some(required);
        self
    }

    pub fn with_send_threads(mut self, threads: u32) -> Self {
        self.send_threads = Some(threads);
        self
    }

    pub fn with_receive_threads(mut self, threads: u32) -> Self {
        self.receive_threads = Some(threads);
        self
    }

    pub fn with_receive_max(mut self, max: u32) -> Self {
        self.receive_max = Some(max);
        self
    }

    pub fn with_allow_incoming(mut self, allow: bool) -> Self {
        self.allow_incoming = Some(allow);
        self
    }

    pub fn with_security_policy(mut self, policy: SecurityPolicy) -> Self {
        self.security_policy = Some(policy);
        self
    }

    pub fn with_whitelist<I, S>(mut self, gateways: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = gateways
            .into_iter()
            .map(Into::into)
            .filter(|gateway: &String| !gateway.is_empty())
            .collect();
        self
    }

    pub fn with_allowed_proxy_hops(mut self, hops: u32) -> Self {
        self.allowed_proxy_hops = Some(hops);
        self
    }

    pub fn with_websocket_session_idle_timeout(mut self, millis: u32) -> Self {
        self.websocket_session_idle_timeout = Some(millis);
        self
    }

    /// Append an outgoing connection. Connections are numbered in insertion order.
    pub fn with_outgoing(mut self, connection: OutgoingConnection) -> Self {
        self.outgoing.push(connection);
        self
    }

    /// Environment entries for every field that was set.
    pub(crate) fn env_vars(&self) -> Vec<(String, String)> {
        let mut env = Vec::new();
        push_opt(&mut env, "GATEWAY_NETWORK_ENABLED", self.enabled);
        push_opt(&mut env, "GATEWAY_NETWORK_REQUIRESSL", self.require_ssl);
        push_opt(
            &mut env,
            "GATEWAY_NETWORK_REQUIRETWOWAYAUTH",
            self.require_two_way_auth,
        );
        push_opt(&mut env, "GATEWAY_NETWORK_SENDTHREADS", self.send_threads);
        push_opt(&mut env, "GATEWAY_NETWORK_RECEIVETHREADS", self.receive_threads);
        push_opt(&mut env, "GATEWAY_NETWORK_RECEIVEMAX", self.receive_max);
        push_opt(&mut env, "GATEWAY_NETWORK_ALLOWINCOMING", self.allow_incoming);
        push_opt(
            &mut env,
            "GATEWAY_NETWORK_SECURITYPOLICY",
            self.security_policy,
        );
        if !self.whitelist.is_empty() {
            env.push((
                "GATEWAY_NETWORK_WHITELIST".to_string(),
                self.whitelist.join(","),
            ));
        }
        push_opt(
            &mut env,
            "GATEWAY_NETWORK_ALLOWEDPROXYHOPS",
            self.allowed_proxy_hops,
        );
        push_opt(
            &mut env,
            "GATEWAY_NETWORK_WEBSOCKETSESSIONIDLETIMEOUT",
            self.websocket_session_idle_timeout,
        );
        for (index, connection) in self.outgoing.iter().enumerate() {
            env.extend(connection.env_vars(index));
        }
        env
    }
}

/// Push `key=value` when the value is present and renders non-empty. `bool`
/// renders as `true`/`false`, numbers in plain base 10.
pub(crate) fn push_opt<V: ToString>(
    env: &mut Vec<(String, String)>,
    key: impl Into<String>,
    value: Option<V>,
) {
    if let Some(value) = value.map(|v| v.to_string()) {
        if !value.is_empty() {
            env.push((key.into(), value));
        }
    }
}
