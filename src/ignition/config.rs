//! User-settable options for an Ignition gateway launch.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use secrecy::SecretString;

use crate::ignition::eam::EamConfig;
use crate::ignition::edition::GatewayEdition;
use crate::ignition::error::{IgnitionError, Result};
use crate::ignition::module::GatewayModule;
use crate::ignition::network::GatewayNetworkConfig;
use crate::ignition::plan::LaunchPlan;
use crate::ignition::validate::{NotFound, validate_path};

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "password";
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// Everything the gateway is told at startup.
///
/// Setters validate eagerly and return `&mut Self` so calls chain with `?`:
///
/// ```rust
/// use testcontainers_ignition::{GatewayEdition, GatewayModule, LaunchConfiguration};
///
/// # fn main() -> testcontainers_ignition::Result<()> {
/// let mut config = LaunchConfiguration::new();
/// config
///     .with_edition(GatewayEdition::Maker)?
///     .with_http_port(9080)?
///     .with_modules([GatewayModule::OpcUa, GatewayModule::Perspective])?;
///
/// assert_eq!(config.plan().env("IGNITION_EDITION"), Some("maker"));
/// # Ok(())
/// # }
/// ```
///
/// Once the configuration has been launched it is frozen and every setter
/// fails with [`IgnitionError::ConfigurationFrozen`]. A second launch needs a
/// fresh configuration.
#[derive(Debug, Clone)]
pub struct LaunchConfiguration {
    username: String,
    password: SecretString,
    license_key: Option<SecretString>,
    activation_token: Option<SecretString>,
    license_accepted: bool,
    quick_start: bool,
    edition: GatewayEdition,
    http_port: Option<u16>,
    https_port: Option<u16>,
    gan_port: Option<u16>,
    timezone: String,
    uid: Option<u32>,
    gid: Option<u32>,
    max_memory: Option<String>,
    debug_mode: bool,
    gateway_name: Option<String>,
    modules: BTreeSet<GatewayModule>,
    third_party_modules: Vec<PathBuf>,
    gateway_backup: Option<PathBuf>,
    restore_disabled: bool,
    additional_args: Vec<String>,
    additional_ports: Vec<u16>,
    network: Option<GatewayNetworkConfig>,
    eam: Option<EamConfig>,
    frozen: bool,
}

impl Default for LaunchConfiguration {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: SecretString::from(DEFAULT_PASSWORD.to_string()),
            license_key: None,
            activation_token: None,
            license_accepted: false,
            quick_start: false,
            edition: GatewayEdition::default(),
            http_port: None,
            https_port: None,
            gan_port: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            uid: None,
            gid: None,
            max_memory: None,
            debug_mode: false,
            gateway_name: None,
            modules: BTreeSet::new(),
            third_party_modules: Vec::new(),
            gateway_backup: None,
            restore_disabled: false,
            additional_args: Vec::new(),
            additional_ports: Vec::new(),
            network: None,
            eam: None,
            frozen: false,
        }
    }
}

impl LaunchConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail if the configuration has already been launched.
    pub(crate) fn check_not_running(&self) -> Result<()> {
        if self.frozen {
            return Err(IgnitionError::ConfigurationFrozen);
        }
        Ok(())
    }

    /// Mark the configuration as launched. Happens once; a second call fails.
    pub(crate) fn freeze(&mut self) -> Result<()> {
        self.check_not_running()?;
        self.frozen = true;
        Ok(())
    }

    /// Whether the configuration has been launched.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// An EAM block is set while an explicit module list leaves out
    /// `enterprise-administration`, so the gateway will ignore it.
    pub(crate) fn eam_without_module(&self) -> bool {
        self.eam.is_some()
            && !self.modules.is_empty()
            && !self.modules.contains(&GatewayModule::EnterpriseAdministration)
    }

    /// Environment, arguments, staged files and ports for the current settings.
    pub fn plan(&self) -> LaunchPlan {
        LaunchPlan::from_config(self)
    }

    // -- licensing --

    /// Accept the Ignition EULA (<https://inductiveautomation.com/ignition/license>).
    pub fn accept_license(&mut self) -> Result<&mut Self> {
        self.check_not_running()?;
        self.license_accepted = true;
        Ok(self)
    }

    pub fn with_license_key(&mut self, key: impl Into<String>) -> Result<&mut Self> {
        self.check_not_running()?;
        self.license_key = Some(SecretString::from(key.into()));
        Ok(self)
    }

    pub fn with_activation_token(&mut self, token: impl Into<String>) -> Result<&mut Self> {
        self.check_not_running()?;
        self.activation_token = Some(SecretString::from(token.into()));
        Ok(self)
    }

    // -- identity --

    /// Set the admin user's name and password together.
    pub fn with_credentials(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<&mut Self> {
        self.check_not_running()?;
        self.username = username.into();
        self.password = SecretString::from(password.into());
        Ok(self)
    }

    pub fn with_admin_username(&mut self, username: impl Into<String>) -> Result<&mut Self> {
        self.check_not_running()?;
        self.username = username.into();
        Ok(self)
    }

    pub fn with_admin_password(&mut self, password: impl Into<String>) -> Result<&mut Self> {
        self.check_not_running()?;
        self.password = SecretString::from(password.into());
        Ok(self)
    }

    // -- topology --

    pub fn with_edition(&mut self, edition: GatewayEdition) -> Result<&mut Self> {
        self.check_not_running()?;
        self.edition = edition;
        Ok(self)
    }

    /// Port the gateway listens on for HTTP inside the container.
    pub fn with_http_port(&mut self, port: u16) -> Result<&mut Self> {
        self.check_not_running()?;
        self.http_port = Some(port);
        Ok(self)
    }

    /// Port the gateway listens on for HTTPS inside the container.
    pub fn with_https_port(&mut self, port: u16) -> Result<&mut Self> {
        self.check_not_running()?;
        self.https_port = Some(port);
        Ok(self)
    }

    /// Gateway network port inside the container.
    pub fn with_gan_port(&mut self, port: u16) -> Result<&mut Self> {
        self.check_not_running()?;
        self.gan_port = Some(port);
        Ok(self)
    }

    /// Timezone identifier such as `America/Chicago`.
    pub fn with_timezone(&mut self, timezone: impl Into<String>) -> Result<&mut Self> {
        self.check_not_running()?;
        self.timezone = timezone.into();
        Ok(self)
    }

    /// Expose an extra container port. Look it up on the running gateway with
    /// [`IgnitionGateway::mapped_port`](crate::IgnitionGateway::mapped_port).
    pub fn with_additional_exposed_port(&mut self, port: u16) -> Result<&mut Self> {
        self.check_not_running()?;
        if !self.additional_ports.contains(&port) {
            self.additional_ports.push(port);
        }
        Ok(self)
    }

    pub fn with_gateway_network(&mut self, network: GatewayNetworkConfig) -> Result<&mut Self> {
        self.check_not_running()?;
        self.network = Some(network);
        Ok(self)
    }

    pub fn with_eam(&mut self, eam: EamConfig) -> Result<&mut Self> {
        self.check_not_running()?;
        self.eam = Some(eam);
        Ok(self)
    }

    // -- process --

    /// UID of the process running the gateway.
    pub fn with_uid(&mut self, uid: u32) -> Result<&mut Self> {
        self.check_not_running()?;
        self.uid = Some(uid);
        Ok(self)
    }

    /// GID of the process running the gateway.
    pub fn with_gid(&mut self, gid: u32) -> Result<&mut Self> {
        self.check_not_running()?;
        self.gid = Some(gid);
        Ok(self)
    }

    /// JVM max heap, e.g. `"2048"` (MB) as understood by the image's `-m` flag.
    pub fn with_max_memory(&mut self, max_memory: impl Into<String>) -> Result<&mut Self> {
        self.check_not_running()?;
        self.max_memory = Some(max_memory.into());
        Ok(self)
    }

    /// Enable JVM remote debugging on port 8000.
    pub fn with_debug_mode(&mut self, debug_mode: bool) -> Result<&mut Self> {
        self.check_not_running()?;
        self.debug_mode = debug_mode;
        Ok(self)
    }

    pub fn with_gateway_name(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        self.check_not_running()?;
        self.gateway_name = Some(name.into());
        Ok(self)
    }

    /// Enable or disable the commissioning quick start.
    pub fn with_quick_start(&mut self, enabled: bool) -> Result<&mut Self> {
        self.check_not_running()?;
        self.quick_start = enabled;
        Ok(self)
    }

    /// Supplemental JVM, wrapper or gateway arguments, passed after `--`.
    /// Replaces any previously set arguments.
    pub fn with_additional_args<I, S>(&mut self, args: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_not_running()?;
        self.additional_args = args.into_iter().map(Into::into).collect();
        Ok(self)
    }

    // -- modules --

    /// Enable exactly these standard modules, replacing the current selection.
    pub fn with_modules(
        &mut self,
        modules: impl IntoIterator<Item = GatewayModule>,
    ) -> Result<&mut Self> {
        self.check_not_running()?;
        self.modules = modules.into_iter().collect();
        Ok(self)
    }

    /// Enable one more standard module.
    pub fn with_module(&mut self, module: GatewayModule) -> Result<&mut Self> {
        self.check_not_running()?;
        self.modules.insert(module);
        Ok(self)
    }

    /// Install exactly these third-party module files, replacing the current
    /// selection. Every path is checked before anything changes.
    pub fn with_third_party_modules<I, P>(&mut self, paths: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.check_not_running()?;

        let mut accepted: Vec<PathBuf> = Vec::new();
        for path in paths {
            let path = check_module_path(path.as_ref())?;
            if !accepted.contains(&path) {
                accepted.push(path);
            }
        }

        self.third_party_modules = accepted;
        Ok(self)
    }

    /// Install one more third-party module file.
    pub fn with_third_party_module(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.check_not_running()?;
        let path = check_module_path(path.as_ref())?;
        if !self.third_party_modules.contains(&path) {
            self.third_party_modules.push(path);
        }
        Ok(self)
    }

    // -- restore --

    /// Restore the gateway from a backup (`*.gwbk`) at startup.
    ///
    /// `restore_disabled` restores the gateway into the disabled state.
    pub fn with_gateway_backup(
        &mut self,
        path: impl AsRef<Path>,
        restore_disabled: bool,
    ) -> Result<&mut Self> {
        self.check_not_running()?;
        let path = path.as_ref();
        validate_path(path)
            .map_err(|NotFound(path)| IgnitionError::GatewayBackupNotFound { path })?;

        self.gateway_backup = Some(path.to_path_buf());
        self.restore_disabled = restore_disabled;
        Ok(self)
    }

    // -- accessors --

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn license_key(&self) -> Option<&SecretString> {
        self.license_key.as_ref()
    }

    pub fn activation_token(&self) -> Option<&SecretString> {
        self.activation_token.as_ref()
    }

    pub fn license_accepted(&self) -> bool {
        self.license_accepted
    }

    pub fn quick_start(&self) -> bool {
        self.quick_start
    }

    pub fn edition(&self) -> GatewayEdition {
        self.edition
    }

    pub fn http_port(&self) -> Option<u16> {
        self.http_port
    }

    pub fn https_port(&self) -> Option<u16> {
        self.https_port
    }

    pub fn gan_port(&self) -> Option<u16> {
        self.gan_port
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn uid(&self) -> Option<u32> {
        self.uid
    }

    pub fn gid(&self) -> Option<u32> {
        self.gid
    }

    pub fn max_memory(&self) -> Option<&str> {
        self.max_memory.as_deref()
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn gateway_name(&self) -> Option<&str> {
        self.gateway_name.as_deref()
    }

    pub fn modules(&self) -> &BTreeSet<GatewayModule> {
        &self.modules
    }

    pub fn third_party_modules(&self) -> &[PathBuf] {
        &self.third_party_modules
    }

    pub fn gateway_backup(&self) -> Option<&Path> {
        self.gateway_backup.as_deref()
    }

    pub fn restore_disabled(&self) -> bool {
        self.restore_disabled
    }

    pub fn additional_args(&self) -> &[String] {
        &self.additional_args
    }

    pub fn additional_exposed_ports(&self) -> &[u16] {
        &self.additional_ports
    }

    pub fn gateway_network(&self) -> Option<&GatewayNetworkConfig> {
        self.network.as_ref()
    }

    pub fn eam(&self) -> Option<&EamConfig> {
        self.eam.as_ref()
    }
}

fn check_module_path(path: &Path) -> Result<PathBuf> {
    validate_path(path).map_err(|NotFound(path)| IgnitionError::ModuleNotFound { path })?;
    if path.file_name().is_none() {
        return Err(IgnitionError::InvalidModulePath {
            path: path.display().to_string(),
        });
    }
    Ok(path.to_path_buf())
}
