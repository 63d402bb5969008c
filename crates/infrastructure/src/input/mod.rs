pub mod cidr;
pub mod wordlist;

pub use cidr::CidrRange;
pub use wordlist::WordlistReader;
