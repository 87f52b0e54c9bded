use ethers::types::Address;
use ethers::utils::to_checksum;

use super::{ChainView, Prompter};

/// Parses `value` only if it is written exactly in its EIP-55 checksummed form.
pub fn parse_checksum_address(value: &str) -> Option<Address> {
    let digits = value.strip_prefix("0x")?;

    if digits.len() != 40 {
        return None;
    }

    let bytes = hex::decode(digits).ok()?;
    let address = Address::from_slice(&bytes);

    (to_checksum(&address, None) == value).then_some(address)
}

/// Keeps prompting until the answer is a checksummed address or a resolvable
/// ENS name.
///
/// The default is only offered on the first attempt.
pub async fn get_address<P: Prompter, C: ChainView>(
    prompter: &mut P,
    chain: &C,
    message: &str,
    default: Option<&str>,
) -> eyre::Result<Address> {
    let mut value = prompter.text(message, default)?;

    loop {
        let candidate = value.trim();

        if let Some(address) = parse_checksum_address(candidate) {
            return Ok(address);
        }

        if let Some(address) = chain.resolve_name(candidate).await? {
            prompter.notify(&format!(
                "Found ENS '{candidate}' [{}]",
                to_checksum(&address, None)
            ));
            return Ok(address);
        }

        prompter.notify(&format!(
            "I'm sorry, but '{candidate}' is not a checksummed address or valid ENS record"
        ));

        value = prompter.text(message, None)?;
    }
}
