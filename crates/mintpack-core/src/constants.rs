//! Fixed values baked into every minted token.

/// Token symbol written into every metadata document.
pub const OBJKT_SYMBOL: &str = "OBJKT";

/// Minter contract referenced by the `minter` field.
pub const MINTER_CONTRACT: &str = "KT1Hkg5qeNhfwpKW4fXvq7HGZB9z2EnmCCA9";

/// Thumbnail used when no rendition could be derived from the artifact.
pub const IPFS_DEFAULT_THUMBNAIL_URI: &str =
    "ipfs://QmNrhZHUaEqxhyLfqoq1mtHSipkWHeT31LNHb1QEbDHgnc";

pub const IPFS_URI_PREFIX: &str = "ipfs://";

/// Media type given to directory entries and to bundle artifacts.
pub const IPFS_DIRECTORY_MIMETYPE: &str = "application/x-directory";

/// Largest artifact accepted for minting, in bytes.
pub const MINT_FILESIZE_LIMIT: usize = 100 * 1024 * 1024;

pub const MAX_DESCRIPTION_LENGTH: usize = 5000;
pub const MAX_RIGHTS_LENGTH: usize = 5000;

/// Name of the entry point every HTML bundle must contain.
pub const BUNDLE_ENTRY_POINT: &str = "index.html";

/// Sibling path holding the untouched entry point of a rewritten bundle.
pub const BUNDLE_RAW_ENTRY_POINT: &str = "index_raw.html";

/// Tool name recorded in the `@mediaParser` attribute.
pub const MEDIA_PARSER_NAME: &str = "mediainfo";

/// Tool name recorded in the `@minter` attribute.
pub const MINTER_TOOL_NAME: &str = "mintpack";

/// Content-security-policy injected into every HTML page of a bundle.
pub const CONTENT_SECURITY_POLICY: &str = concat!(
    "upgrade-insecure-requests; ",
    "default-src 'none'; ",
    "frame-src 'self'; ",
    "child-src 'self'; ",
    "script-src 'self' 'unsafe-inline' 'unsafe-eval' blob:; ",
    "style-src 'self' 'unsafe-inline'; ",
    "img-src 'self' 'unsafe-inline' data: blob: https://services.tzkt.io https://ipfs.infura.io ",
    "https://*.infura-ipfs.io https://cloudflare-ipfs.com/ https://ipfs.io/ ",
    "https://templewallet.com/logo.png https://gateway.pinata.cloud/; ",
    "font-src 'self' data: https://ipfs.infura.io https://*.infura-ipfs.io https://cloudflare-ipfs.com/ ",
    "https://fonts.googleapis.com/ https://ipfs.io/ https://gateway.pinata.cloud/; ",
    "connect-src 'self' https://better-call.dev https://*.better-call.dev ",
    "https://*.cryptonomic-infra.tech https://cryptonomic-infra.tech https://*.infura.io ",
    "https://*.infura-ipfs.io https://infura.io blob: data: ws: wss: bootstrap.libp2p.io ",
    "preload.ipfs.io https://mainnet.smartpy.io https://mainnet-tezos.giganode.io ",
    "https://api.etherscan.io https://api.thegraph.com https://*.tzkt.io https://api.hicdex.com ",
    "https://hdapi.teztools.io https://api.tzstats.com https://*.wikidata.org ",
    "https://*.coinmarketcap.com https://api.openweathermap.org https://hicetnunc.xyz ",
    "https://*.hicetnunc.xyz; ",
    "manifest-src 'self'; ",
    "base-uri 'self'; ",
    "form-action 'none'; ",
    "media-src 'self' 'unsafe-inline' data: blob: https://ipfs.infura.io https://*.infura-ipfs.io ",
    "https://cloudflare-ipfs.com/ https://ipfs.io/ https://gateway.pinata.cloud/; ",
    "prefetch-src 'self' https://ipfs.infura.io https://*.infura-ipfs.io https://cloudflare-ipfs.com/ ",
    "https://fonts.googleapis.com/ https://ipfs.io/ https://gateway.pinata.cloud/; ",
    "worker-src 'self' 'unsafe-inline' blob:;"
);

/// Matches a content-identifier URI: `ipfs://` followed by a CIDv0 or a
/// base32/base58/base16 CIDv1.
pub const IPFS_URI_PATTERN: &str = r"^ipfs://(Qm[1-9A-HJ-NP-Za-km-z]{44,}|b[A-Za-z2-7]{58,}|B[A-Z2-7]{58,}|z[1-9A-HJ-NP-Za-km-z]{48,}|F[0-9A-F]{50,})$";

pub const TEZOS_ADDRESS_PATTERN: &str = r"^(tz1|tz2|tz3|KT1)[0-9a-zA-Z]{33}$";

pub const DATE_TIME_PATTERN: &str =
    r"^\d{4}-\d\d-\d\dT\d\d:\d\d:\d\d(\.\d+)?(([+-]\d\d:\d\d)|Z)?$";

pub const DIMENSIONS_PATTERN: &str = r"^(\d*\.?\d+)\s*x\s*(\d*\.?\d+)$";
