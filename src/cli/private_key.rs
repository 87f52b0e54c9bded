use std::fmt;

use ethers::prelude::k256::SecretKey;
use ethers::signers::LocalWallet;

/// Raw key handed to `forge create`, which cannot read keystores by itself.
#[derive(Clone)]
pub struct PrivateKey {
    pub key: SecretKey,
}

impl PrivateKey {
    pub fn from_wallet(wallet: &LocalWallet) -> eyre::Result<Self> {
        let key = SecretKey::from_slice(&wallet.signer().to_bytes())?;

        Ok(Self { key })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PrivateKey(..)")
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }

        write!(f, "{}", hex::encode(self.key.to_bytes()))
    }
}
