use std::{fmt, str::FromStr};

use url::Url;

#[cfg(client)]
use solana_client::nonblocking::rpc_client::RpcClient;
#[cfg(client)]
use solana_sdk::commitment_config::CommitmentConfig;

/// Solana cluster to connect to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Cluster {
    /// Mainnet-beta.
    Mainnet,
    /// Devnet.
    #[default]
    Devnet,
    /// Testnet.
    Testnet,
    /// A local validator.
    Localnet,
    /// Custom cluster, given as `(http_url, ws_url)`.
    Custom(String, String),
}

impl Cluster {
    /// Get the HTTP url of the RPC endpoint.
    pub fn url(&self) -> &str {
        match self {
            Self::Mainnet => "https://api.mainnet-beta.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::Localnet => "http://127.0.0.1:8899",
            Self::Custom(url, _) => url,
        }
    }

    /// Get the websocket url of the RPC endpoint.
    pub fn ws_url(&self) -> &str {
        match self {
            Self::Mainnet => "wss://api.mainnet-beta.solana.com",
            Self::Devnet => "wss://api.devnet.solana.com",
            Self::Testnet => "wss://api.testnet.solana.com",
            Self::Localnet => "ws://127.0.0.1:8900",
            Self::Custom(_, ws_url) => ws_url,
        }
    }

    /// Create a nonblocking RPC client with the given commitment.
    #[cfg(client)]
    pub fn rpc(&self, commitment: CommitmentConfig) -> RpcClient {
        RpcClient::new_with_commitment(self.url().to_string(), commitment)
    }

    fn custom_from_url(url: &str) -> crate::Result<Self> {
        let http = Url::parse(url)?;
        let mut ws = http.clone();
        let scheme = match http.scheme() {
            "http" => "ws",
            "https" => "wss",
            _ => return Err(crate::Error::ParseCluster("unsupported url scheme")),
        };
        ws.set_scheme(scheme)
            .map_err(|_| crate::Error::ParseCluster("invalid websocket scheme"))?;
        // The pubsub endpoint listens on the next port by convention.
        if let Some(port) = http.port() {
            ws.set_port(Some(port.saturating_add(1)))
                .map_err(|_| crate::Error::ParseCluster("invalid websocket port"))?;
        }
        Ok(Self::Custom(url.to_string(), ws.to_string()))
    }
}

impl FromStr for Cluster {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" | "mainnet" | "mainnet-beta" => Ok(Self::Mainnet),
            "d" | "devnet" => Ok(Self::Devnet),
            "t" | "testnet" => Ok(Self::Testnet),
            "l" | "localnet" | "localhost" => Ok(Self::Localnet),
            _ => Self::custom_from_url(s),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Devnet => write!(f, "devnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Localnet => write!(f, "localnet"),
            Self::Custom(url, _) => write!(f, "{url}"),
        }
    }
}

#[cfg(serde)]
impl serde::Serialize for Cluster {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(serde)]
impl<'de> serde::Deserialize<'de> for Cluster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = std::borrow::Cow::<'de, str>::deserialize(deserializer)?;
        s.parse().map_err(<D::Error as serde::de::Error>::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_clusters() {
        assert_eq!("devnet".parse::<Cluster>().unwrap(), Cluster::Devnet);
        assert_eq!("Mainnet-Beta".parse::<Cluster>().unwrap(), Cluster::Mainnet);
        assert_eq!("l".parse::<Cluster>().unwrap(), Cluster::Localnet);
    }

    #[test]
    fn parse_custom_cluster() {
        let cluster: Cluster = "http://127.0.0.1:9000".parse().unwrap();
        assert_eq!(cluster.url(), "http://127.0.0.1:9000");
        assert_eq!(cluster.ws_url(), "ws://127.0.0.1:9001/");

        let cluster: Cluster = "https://rpc.example.com/?api-key=abc".parse().unwrap();
        assert_eq!(cluster.ws_url(), "wss://rpc.example.com/?api-key=abc");
        assert_eq!(cluster.to_string(), "https://rpc.example.com/?api-key=abc");
    }

    #[test]
    fn reject_unknown_scheme() {
        assert!("ftp://example.com".parse::<Cluster>().is_err());
        assert!("not a cluster".parse::<Cluster>().is_err());
    }
}
