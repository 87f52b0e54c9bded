use ethers::contract::abigen;

abigen!(
    Erc20,
    r#"[
        function symbol() external view returns (string)
    ]"#
);

abigen!(
    Registry,
    r#"[
        function latestRelease() external view returns (string)
        function newExperimentalVault(address token, address governance, address guardian, address rewards, string name, string symbol) external returns (address)
        event NewExperimentalVault(address indexed token, address indexed deployer, address vault, string api_version)
    ]"#
);
