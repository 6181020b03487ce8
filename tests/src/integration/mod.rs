//! Integration tests across the link crates.

#[cfg(test)]
mod support;

#[cfg(test)]
mod chain_links;
#[cfg(test)]
mod devnet;
#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;
