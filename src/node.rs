//! Node identity providers
//!
//! A provider is consulted exactly once, when a generator is built.

use std::net::{IpAddr, Ipv4Addr};

use crate::error::SlotIDError;

/// Supplies the 16-bit node ID embedded in every identifier
pub trait NodeIdProvider: Send + Sync {
    fn node_id(&self) -> Result<u16, SlotIDError>;
}

impl<F> NodeIdProvider for F
where
    F: Fn() -> Result<u16, SlotIDError> + Send + Sync,
{
    fn node_id(&self) -> Result<u16, SlotIDError> {
        self()
    }
}

/// A fixed node ID, e.g. taken from deployment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticNodeId(pub u16);

impl NodeIdProvider for StaticNodeId {
    fn node_id(&self) -> Result<u16, SlotIDError> {
        Ok(self.0)
    }
}

/// Derives the node ID from the lower 16 bits of the host's private IPv4 address
///
/// Interfaces are enumerated in the order the OS reports them and the first
/// private or link-local IPv4 address is used, whatever the default route is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrivateIpv4;

impl PrivateIpv4 {
    /// Lower 16 bits of `addr` if it is a private or link-local IPv4 address
    pub fn lower_16_bits(addr: Ipv4Addr) -> Option<u16> {
        if !(addr.is_private() || addr.is_link_local()) {
            return None;
        }
        let [_, _, hi, lo] = addr.octets();
        Some(u16::from_be_bytes([hi, lo]))
    }

    /// Node ID from the first private or link-local IPv4 address in `addrs`
    pub(crate) fn node_id_from<I>(addrs: I) -> Result<u16, SlotIDError>
    where
        I: IntoIterator<Item = IpAddr>,
    {
        addrs
            .into_iter()
            .find_map(|addr| match addr {
                IpAddr::V4(v4) => Self::lower_16_bits(v4),
                IpAddr::V6(_) => None,
            })
            .ok_or_else(|| SlotIDError::node_id("no private IPv4 interface found"))
    }
}

impl NodeIdProvider for PrivateIpv4 {
    fn node_id(&self) -> Result<u16, SlotIDError> {
        let interfaces = if_addrs::get_if_addrs().map_err(SlotIDError::node_id)?;
        Self::node_id_from(interfaces.iter().map(|iface| iface.ip()))
    }
}
