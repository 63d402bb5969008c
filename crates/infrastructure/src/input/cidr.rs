use ferrous_recon_domain::DomainError;
use ipnetwork::IpNetwork;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// Upper bound on the addresses one range may expand to.
pub const MAX_RANGE_ADDRESSES: u128 = 1 << 16;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Network(IpNetwork),
    /// Inclusive IPv4 span written as `start-end`
    Span(u32, u32),
}

impl Block {
    fn size(&self) -> u128 {
        match self {
            Block::Network(IpNetwork::V4(net)) => prefix_size(32, net.prefix()),
            Block::Network(IpNetwork::V6(net)) => prefix_size(128, net.prefix()),
            Block::Span(start, end) => u128::from(end - start) + 1,
        }
    }

    fn addresses(&self) -> Box<dyn Iterator<Item = IpAddr> + '_> {
        match self {
            Block::Network(net) => Box::new(net.iter()),
            Block::Span(start, end) => {
                Box::new((*start..=*end).map(|n| IpAddr::V4(Ipv4Addr::from(n))))
            }
        }
    }
}

/// Addresses under a `/prefix` of a `bits`-wide family, saturating at
/// `u128::MAX` for `::/0`.
fn prefix_size(bits: u8, prefix: u8) -> u128 {
    1u128
        .checked_shl(u32::from(bits.saturating_sub(prefix)))
        .unwrap_or(u128::MAX)
}

/// Address range for the reverse sweep: comma or space separated CIDR
/// blocks, single addresses or IPv4 `start-end` spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidrRange {
    blocks: Vec<Block>,
}

impl CidrRange {
    pub fn len(&self) -> u128 {
        self.blocks
            .iter()
            .map(Block::size)
            .fold(0u128, u128::saturating_add)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.blocks.iter().flat_map(Block::addresses)
    }

    fn parse_block(raw: &str) -> Result<Block, DomainError> {
        if let Some((start, end)) = raw.split_once('-') {
            let start = parse_v4(start.trim(), raw)?;
            let end = parse_v4(end.trim(), raw)?;
            if start > end {
                return Err(DomainError::InputError(format!(
                    "Range {} ends before it starts",
                    raw
                )));
            }
            return Ok(Block::Span(start, end));
        }

        IpNetwork::from_str(raw)
            .map(Block::Network)
            .map_err(|e| DomainError::InputError(format!("Invalid range '{}': {}", raw, e)))
    }
}

fn parse_v4(value: &str, raw: &str) -> Result<u32, DomainError> {
    value
        .parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| DomainError::InputError(format!("Invalid range '{}'", raw)))
}

impl FromStr for CidrRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let blocks = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(Self::parse_block)
            .collect::<Result<Vec<_>, _>>()?;

        let range = Self { blocks };
        let size = range.len();
        if size > MAX_RANGE_ADDRESSES {
            return Err(DomainError::InputError(format!(
                "Range '{}' covers {} addresses (limit {})",
                s, size, MAX_RANGE_ADDRESSES
            )));
        }
        Ok(range)
    }
}
