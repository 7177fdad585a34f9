//! Per-network static configuration: default checkpoints, hard-fork
//! schedule and DNS checkpoint domains.
//!
//! Tables are plain immutable data handed to the store at construction, so
//! tests can build a [`NetworkParams`] with synthetic pins instead of
//! reaching for process-wide globals.

use crate::network::NetworkType;

/// A scheduled protocol version activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardFork {
    pub version: u8,
    pub height: u64,
    pub threshold: u8,
    pub time: u64,
    /// Per-row flag column of the published schedule, carried as is.
    pub flags: u8,
}

const fn fork(version: u8, height: u64, threshold: u8, time: u64, flags: u8) -> HardFork {
    HardFork {
        version,
        height,
        threshold,
        time,
        flags,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NetworkParams {
    pub network: NetworkType,
    /// Compiled-in trust anchors as `(height, hex hash)`, ascending.
    pub checkpoints: &'static [(u64, &'static str)],
    /// Activation rows, ascending by height.
    pub hard_forks: &'static [HardFork],
    pub dns_domains: &'static [&'static str],
}

const MAINNET_CHECKPOINTS: &[(u64, &str)] = &[
    (1, "f48e334a588b89260bd75a1925df0f145751cda3025b713c73aa78232da3e4d6"),
    (100, "3ecd27aded3269d142128aab5af78fc91c7fa2c7adf63e58844208b46fa83b58"),
    (10000, "ee54ea5924ffa8677290620a6ddc865224ea8a297e7c08a10dbb62d156e2a1ec"),
    (50000, "cc3e8c228df95fe3abedeb0339ef8ae425b592b6ce61ee853a87b8aad20b69b7"),
    (75000, "d9a01e54ebc9fb720e326fcc10c9a7a83e64c339a038fb33e420e4d913aa0dce"),
    (100000, "1d69279e55a88120db679e7ecceb5415424623422609d86f6a2fbdb892a55b93"),
    (110000, "019d822a299f2c5c7acfc19b32649c3add8e0697ea6e1592d3c46cd2036ca2f3"),
    (150000, "b9cbaa0bccd30478f26fe4f6177b66c010cbf2b589c9c44c82a9794bce5ed418"),
    (300000, "85fce3b66fd8113aace405957b3459c54dd39d9b5eb6976ecdfec9e750399562"),
    (400000, "1ed1e3fd9174be998ac4f446dcfc91080477a4a790acf5d199fc633b9d76af01"),
    (500000, "4a5e0b52efa1b922e793d1d5b5f77930c55c19770b5f5e680ee816f5bc2a7c97"),
    (600000, "0a42fe6a40f5b084fb63c77c0d76e9e274a78687397af5cc6bbb27a9458d9afb"),
    (700000, "a0a62377dc0ea9d869b0c381ffe19b18ea0434bb720390f4bd57b509f252289d"),
    (800000, "62207aad524bdcc3572f1e1d778a64bd571c90cc4f0c20fa48a59b30eac42ed8"),
    (1000000, "bd44362fdc5a0e3f83765fa26a85f0b395bb790e21ff25a9ed802cd8a94e91b4"),
    (1250000, "7a53910047eb12b347375b75213ed7b28656fccc76281002f759e676a7931396"),
    (1500000, "4c0a13efaa9f39e5e870621d39aaa7baf33c9c27a137a9a20d7ba57332a9f588"),
    (1750000, "a06ad4b21cd3b9d5544f62f77c3dd163dc240913252582dfc75fab829ab0d149"),
    (2000000, "2a5920d297d8e1e88bc0845d6b964c46009d78266258596c84dff446c9a1042c"),
    (2250000, "e58da5b896cb9e923a8daf7d7f7d670636d2fb8e9b8b7ae723b1ddfd09068e93"),
    (2500000, "70791ca10ff16168dca78076efa67f2153c4ff68fe5b92d100d16fca7966bfb3"),
    (2750000, "7b7106b23809716b4a9e0e6ee881fa6272ac15f2f42522d0666d4a6aa31aad78"),
    (3000000, "04f18897bb02bc6275069b6cb460d34ca7df011e6a913b5efec0557f8639086f"),
    (3250000, "5535b32b30fe6896de4c966962006bdc4a9fc706f3f4d31ec35cfa9edacbc41e"),
    (3500000, "551e50f2088bb66715a0ba3e8cc80af6d159d4f671426064382a74503eb0f4b3"),
    (3616348, "e833befdc5ccb515d2fc4337c314bfcece32887cbc6ec619770599ae02c13122"),
    (3619107, "b42aa409b05d7c0d399e67391b3f332f590dda2c92611bf82ea1850ccaabff2a"),
];

const MAINNET_HARD_FORKS: &[HardFork] = &[
    fork(1, 1, 0, 1542228716, 0),
    fork(2, 100, 0, 1542238717, 0),
    fork(3, 150, 0, 1542248718, 0),
    fork(8, 150000, 0, 1545317008, 0),
    fork(9, 151000, 0, 1545332008, 0),
    fork(10, 555555, 0, 1550658699, 1),
    fork(11, 750000, 51, 1553561408, 0),
];

const TESTNET_HARD_FORKS: &[HardFork] = &[
    fork(1, 1, 0, 1542228716, 0),
    fork(2, 100, 0, 1542438717, 0),
    fork(3, 150, 0, 1542548718, 0),
    fork(9, 250, 0, 1542648718, 0),
    fork(10, 52000, 51, 1549934499, 1),
    fork(11, 62500, 51, 1552491067, 0),
];

const STAGENET_HARD_FORKS: &[HardFork] = &[
    fork(1, 1, 0, 1341378000, 0),
    fork(10, 2, 0, 1341478000, 0),
    fork(11, 21200, 0, 1551820225, 0),
];

pub const MAINNET: NetworkParams = NetworkParams {
    network: NetworkType::Mainnet,
    checkpoints: MAINNET_CHECKPOINTS,
    hard_forks: MAINNET_HARD_FORKS,
    dns_domains: &[],
};

pub const TESTNET: NetworkParams = NetworkParams {
    network: NetworkType::Testnet,
    checkpoints: &[],
    hard_forks: TESTNET_HARD_FORKS,
    dns_domains: &[],
};

pub const STAGENET: NetworkParams = NetworkParams {
    network: NetworkType::Stagenet,
    checkpoints: &[],
    hard_forks: STAGENET_HARD_FORKS,
    dns_domains: &[],
};

impl NetworkParams {
    pub fn for_network(network: NetworkType) -> &'static NetworkParams {
        match network {
            NetworkType::Mainnet => &MAINNET,
            NetworkType::Testnet => &TESTNET,
            NetworkType::Stagenet => &STAGENET,
        }
    }

    /// Protocol version active at `height`, or `None` before the first fork.
    pub fn version_at(&self, height: u64) -> Option<u8> {
        let idx = self.hard_forks.partition_point(|f| f.height <= height);
        idx.checked_sub(1).map(|i| self.hard_forks[i].version)
    }

    /// First height at which `version` is scheduled.
    pub fn earliest_height(&self, version: u8) -> Option<u64> {
        self.hard_forks
            .iter()
            .find(|f| f.version == version)
            .map(|f| f.height)
    }

    pub fn dns_domains(&self) -> Vec<String> {
        self.dns_domains.iter().map(|d| d.to_string()).collect()
    }
}
