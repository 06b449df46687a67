use super::RecordType;
use std::net::IpAddr;
use std::sync::Arc;

/// Payload of an answer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// A or AAAA address.
    Address(IpAddr),
    /// Record relayed from an upstream, kept in its wire encoding.
    /// Opaque to the domain and application layers; only the
    /// infrastructure codec decodes it.
    Wire(Arc<[u8]>),
}

/// DNS answer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// Owner name, without the trailing root dot.
    pub name: Arc<str>,
    pub record_type: RecordType,
    /// Time to live in seconds
    pub ttl: u32,
    pub data: RecordData,
}

impl DnsRecord {
    pub fn new(
        name: impl Into<Arc<str>>,
        record_type: RecordType,
        ttl: u32,
        data: RecordData,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            data,
        }
    }

    /// Address record; the type follows the address family.
    pub fn address(name: impl Into<Arc<str>>, address: IpAddr, ttl: u32) -> Self {
        let record_type = match address {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::AAAA,
        };
        Self::new(name, record_type, ttl, RecordData::Address(address))
    }

    pub fn ip(&self) -> Option<IpAddr> {
        match self.data {
            RecordData::Address(ip) => Some(ip),
            RecordData::Wire(_) => None,
        }
    }

    /// Same record under another owner name.
    pub fn renamed(&self, name: &Arc<str>) -> Self {
        Self {
            name: Arc::clone(name),
            ..self.clone()
        }
    }
}
