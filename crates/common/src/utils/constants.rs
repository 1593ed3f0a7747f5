/// The Pinata endpoint every file and directory is pinned through.
pub const PIN_FILE_TO_IPFS_URL: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";
/// Header carrying the public API key
pub const API_KEY_HEADER: &str = "pinata_api_key";
/// Header carrying the secret API key
pub const SECRET_API_KEY_HEADER: &str = "pinata_secret_api_key";
/// Gateway used to build links to pinned content
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.pinata.cloud/ipfs/";
/// Request timeout when none is configured, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
