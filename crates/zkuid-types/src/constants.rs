pub const ADDRESS_SIZE: usize = 20;

pub const TX_HASH_PREVIEW_CHARS: usize = 10;

pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";
