//! Converters for network address types.
//!
//! - `IpAddr`, `Ipv4Addr`, `Ipv6Addr`: a literal address.
//! - `IpNetwork`: an address with a prefix length in CIDR notation.
//! - `SocketAddr`: an address or host name, optionally with a port; a
//!   missing port becomes `0`. Host names are resolved and the first
//!   address is used.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs};

use ipnetwork::IpNetwork;

use crate::error::ConvertError;

use super::{Tokens, TypeRegistry, converter, one_value, single};

/// Registers the network converters.
pub fn register(registry: &mut TypeRegistry) {
    registry
        .register_from_str::<IpAddr>()
        .register_from_str::<Ipv4Addr>()
        .register_from_str::<Ipv6Addr>()
        .register::<IpNetwork>([one_value(), converter(parse_network)])
        .register::<SocketAddr>([one_value(), converter(parse_socket_addr)]);
}

/// Parses a CIDR network such as `10.0.0.0/8` or `fd00::/64`.
///
/// # Errors
///
/// Returns [`ConvertError::Invalid`] if the value is not a valid network.
pub fn parse_network(tokens: Tokens) -> Result<IpNetwork, ConvertError> {
    let value = single(tokens)?;
    value
        .parse::<IpNetwork>()
        .map_err(|err| ConvertError::invalid(value, err))
}

/// Parses a socket address, falling back to port `0` when none is given.
///
/// # Errors
///
/// Returns [`ConvertError::Invalid`] if the value is neither an address nor
/// a resolvable host, with or without a port.
pub fn parse_socket_addr(tokens: Tokens) -> Result<SocketAddr, ConvertError> {
    let value = single(tokens)?;

    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = value.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, 0));
    }

    match lookup(&value) {
        Ok(addr) => Ok(addr),
        // Report the error for the value as written, not the port-0 retry.
        Err(err) => lookup(&format!("{value}:0")).map_err(|_| err),
    }
}

fn lookup(addr: &str) -> Result<SocketAddr, ConvertError> {
    addr.to_socket_addrs()
        .map_err(|err| ConvertError::invalid(addr, err))?
        .next()
        .ok_or_else(|| ConvertError::invalid(addr, "host has no addresses"))
}
