use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::util::error::ServiceDebugError;

/// A single port-forward invocation as requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ForwardRequest {
    pub(crate) port_pair: String,
    pub(crate) namespace: String,
    pub(crate) source_ref: String,
    pub(crate) display_name: String,
}

impl ForwardRequest {
    pub(crate) fn new(
        port_pair: impl Into<String>,
        namespace: impl Into<String>,
        source_ref: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            port_pair: port_pair.into(),
            namespace: namespace.into(),
            source_ref: source_ref.into(),
            display_name: display_name.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<PortPair, ServiceDebugError> {
        require_non_empty("namespace", &self.namespace)?;
        require_non_empty("source reference", &self.source_ref)?;
        require_non_empty("service name", &self.display_name)?;
        self.port_pair.parse()
    }
}

fn require_non_empty(name: &str, value: &str) -> Result<(), ServiceDebugError> {
    if value.trim().is_empty() {
        return Err(ServiceDebugError::InvalidArgument(format!(
            "The {name} must not be empty"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PortPair {
    pub(crate) container_port: String,
    pub(crate) service_port: String,
}

impl FromStr for PortPair {
    type Err = ServiceDebugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ports: Vec<&str> = s.trim().split(':').collect();
        match ports.as_slice() {
            [container_port, service_port]
                if !container_port.is_empty() && !service_port.is_empty() =>
            {
                Ok(Self {
                    container_port: container_port.to_string(),
                    service_port: service_port.to_string(),
                })
            }
            _ => Err(ServiceDebugError::InvalidArgument(format!(
                "Port map should be in the form of \"containerport:serviceport\", got {s:?}"
            ))),
        }
    }
}

impl Display for PortPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.container_port, self.service_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_pair() {
        let pair: PortPair = "8080:80".parse().unwrap();
        assert_eq!(pair.container_port, "8080");
        assert_eq!(pair.service_port, "80");
        assert_eq!(pair.to_string(), "8080:80");
    }

    #[test]
    fn test_parse_port_pair_trims() {
        let pair: PortPair = " 8080:80 \n".parse().unwrap();
        assert_eq!(pair.to_string(), "8080:80");
    }

    #[test]
    fn test_parse_named_ports() {
        let pair: PortPair = "http:web".parse().unwrap();
        assert_eq!(pair.container_port, "http");
        assert_eq!(pair.service_port, "web");
    }

    #[test]
    fn test_parse_port_pair_invalid() {
        for value in ["8080", "8080:9090:1000", ":80", "80:", ":", "", "   "] {
            let result = value.parse::<PortPair>();
            assert!(
                matches!(result, Err(ServiceDebugError::InvalidArgument(_))),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate() {
        let request = ForwardRequest::new("8080:80", "team-a", "pod/my-svc", "my-svc");
        assert_eq!(request.validate().unwrap().to_string(), "8080:80");

        for request in [
            ForwardRequest::new("8080:80", "", "pod/my-svc", "my-svc"),
            ForwardRequest::new("8080:80", "team-a", " ", "my-svc"),
            ForwardRequest::new("8080:80", "team-a", "pod/my-svc", ""),
            ForwardRequest::new("8080", "team-a", "pod/my-svc", "my-svc"),
        ] {
            assert!(matches!(
                request.validate(),
                Err(ServiceDebugError::InvalidArgument(_))
            ));
        }
    }
}
