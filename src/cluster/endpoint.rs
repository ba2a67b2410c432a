use serde::{Deserialize, Serialize};
use std::{
    fmt,
    net::{IpAddr, Ipv6Addr},
    str::FromStr,
};

/// Port the API server listens on when the endpoint does not name one
pub const DEFAULT_API_SERVER_PORT: u16 = 6443;

const MAX_FQDN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Load balanced control plane endpoint, IP address or FQDN plus port
///
/// Accepted forms:
/// - `10.0.0.1`, `10.0.0.1:6443`
/// - `fd00::1`, `[fd00::1]:6443`
/// - `lb.example.com`, `lb.example.com.`, `lb.example.com:6443`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPlane {
    pub host: String,
    pub port: u16,
}

impl ControlPlane {
    /// Whether the host is an IP address rather than a name
    #[must_use]
    pub fn is_ip(&self) -> bool {
        self.host.parse::<IpAddr>().is_ok()
    }
}

impl FromStr for ControlPlane {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("control plane endpoint must not be empty".to_string());
        }

        // bare IPv6 has colons of its own, try it before splitting off a port
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(Self {
                host: ip.to_string(),
                port: DEFAULT_API_SERVER_PORT,
            });
        }

        if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| format!("Invalid control plane {s}: missing closing bracket"))?;
            let ip = host
                .parse::<Ipv6Addr>()
                .map_err(|_| format!("Invalid control plane {s}: {host} is not an IPv6 address"))?;
            let port = match tail {
                "" => DEFAULT_API_SERVER_PORT,
                _ => tail
                    .strip_prefix(':')
                    .ok_or_else(|| format!("Invalid control plane {s}: unexpected {tail}"))
                    .and_then(|port| parse_port(s, port))?,
            };
            return Ok(Self {
                host: ip.to_string(),
                port,
            });
        }

        let (host, port) = match s.rsplit_once(':') {
            Some((host, port)) => (host, parse_port(s, port)?),
            None => (s, DEFAULT_API_SERVER_PORT),
        };

        if host.parse::<IpAddr>().is_ok() || is_fqdn(host) {
            Ok(Self {
                host: host.trim_end_matches('.').to_string(),
                port,
            })
        } else {
            Err(format!(
                "Invalid control plane {s}: {host} is neither an IP address nor a valid FQDN"
            ))
        }
    }
}

impl fmt::Display for ControlPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

fn parse_port(endpoint: &str, port: &str) -> Result<u16, String> {
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(format!("Invalid control plane {endpoint}: bad port {port}")),
        Ok(port) => Ok(port),
    }
}

fn is_fqdn(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > MAX_FQDN_LEN {
        return false;
    }

    // an all-numeric top label is a malformed IP address, not a host name
    if name
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit()))
    {
        return false;
    }

    name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
