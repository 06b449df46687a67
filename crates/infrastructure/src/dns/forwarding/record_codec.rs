//! Conversion between domain answer records and hickory records.
//!
//! Address records are decoded into `RecordData::Address`. Every other type
//! is kept as the upstream's wire encoding so it can be relayed untouched,
//! apart from its owner name.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable};
use pod_dns_domain::dns_query::normalize_domain;
use pod_dns_domain::{DnsRecord, DomainError, RecordData};
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;

/// Parse a presentation-format name as fully qualified.
pub fn to_fqdn(domain: &str) -> Result<Name, DomainError> {
    let trimmed = normalize_domain(domain);
    if trimmed.is_empty() {
        return Ok(Name::root());
    }
    Name::from_str(&format!("{}.", trimmed)).map_err(|e| {
        DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
    })
}

pub struct RecordCodec;

impl RecordCodec {
    pub fn to_domain(record: &Record) -> Result<DnsRecord, DomainError> {
        let name: Arc<str> = normalize_domain(&record.name().to_utf8()).into();
        let record_type = RecordTypeMapper::from_hickory(record.record_type());
        let ttl = record.ttl();

        let data = match record.data() {
            RData::A(a) => RecordData::Address(IpAddr::V4(a.0)),
            RData::AAAA(aaaa) => RecordData::Address(IpAddr::V6(aaaa.0)),
            _ => {
                let bytes = record.to_bytes().map_err(|e| {
                    DomainError::InvalidDnsResponse(format!("Failed to encode record: {}", e))
                })?;
                RecordData::Wire(Arc::from(bytes))
            }
        };

        Ok(DnsRecord::new(name, record_type, ttl, data))
    }

    /// Build the hickory record, owned by `record.name`.
    pub fn to_hickory(record: &DnsRecord) -> Result<Record, DomainError> {
        let name = to_fqdn(&record.name)?;

        let rdata = match &record.data {
            RecordData::Address(IpAddr::V4(ip)) => RData::A(A(*ip)),
            RecordData::Address(IpAddr::V6(ip)) => RData::AAAA(AAAA(*ip)),
            RecordData::Wire(bytes) => {
                let relayed = Record::from_bytes(bytes).map_err(|e| {
                    DomainError::InvalidDnsResponse(format!("Failed to decode record: {}", e))
                })?;
                relayed.data().clone()
            }
        };

        Ok(Record::from_rdata(name, record.ttl, rdata))
    }
}
