use ethers::abi::{Abi, Function, Token};
use ethers::providers::Middleware;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Eip1559TransactionRequest, TransactionReceipt};
use eyre::{bail, Context, ContextCompat};
use tracing::{info, instrument};

use crate::deployment::{DeploymentContext, RpcSigner};

pub struct Transaction<'a> {
    context: &'a DeploymentContext,
    abi: Abi,
    function_name: String,
    args: Vec<Token>,
    signer: RpcSigner,
    to: Address,
}

#[derive(Default, Clone, Debug)]
pub struct TransactionBuilder<'a> {
    context: Option<&'a DeploymentContext>,
    abi: Option<Abi>,
    function_name: Option<String>,
    args: Option<Vec<Token>>,
    signer: Option<RpcSigner>,
    to: Option<Address>,
}

impl<'a> TransactionBuilder<'a> {
    pub fn context(mut self, context: &'a DeploymentContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn abi(mut self, abi: Abi) -> Self {
        self.abi = Some(abi);
        self
    }

    pub fn function_name(mut self, function_name: impl ToString) -> Self {
        self.function_name = Some(function_name.to_string());
        self
    }

    pub fn args(mut self, args: Vec<Token>) -> Self {
        self.args = Some(args);
        self
    }

    pub fn signer(mut self, signer: RpcSigner) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn build(self) -> eyre::Result<Transaction<'a>> {
        Ok(Transaction {
            context: self
                .context
                .context("TransactionBuilder missing context")?,
            abi: self.abi.context("TransactionBuilder missing abi")?,
            function_name: self
                .function_name
                .context("TransactionBuilder missing function_name")?,
            args: self.args.context("TransactionBuilder missing args")?,
            signer: self.signer.context("TransactionBuilder missing signer")?,
            to: self.to.context("TransactionBuilder missing to")?,
        })
    }
}

/// Picks the overload of `name` taking exactly `arity` arguments.
pub fn function_with_arity<'a>(
    abi: &'a Abi,
    name: &str,
    arity: usize,
) -> eyre::Result<&'a Function> {
    abi.functions_by_name(name)?
        .iter()
        .find(|func| func.inputs.len() == arity)
        .with_context(|| {
            format!("No overload of {name} takes {arity} arguments")
        })
}

impl<'a> Transaction<'a> {
    #[instrument(name = "transaction", skip_all, fields(function = %self.function_name, to = ?self.to))]
    pub async fn send(self) -> eyre::Result<TransactionReceipt> {
        let func =
            function_with_arity(&self.abi, &self.function_name, self.args.len())?;
        let call_data = func.encode_input(&self.args)?;

        let mut tx = TypedTransaction::Eip1559(
            Eip1559TransactionRequest::new()
                .to(self.to)
                .data(call_data)
                .nonce(self.context.next_nonce()),
        );

        self.signer.fill_transaction(&mut tx, None).await?;

        let tx = self
            .signer
            .send_transaction(tx, None)
            .await
            .context("Send transaction")?;

        info!("Sent transaction {:?}", tx.tx_hash());

        let receipt = tx
            .await
            .context("Awaiting receipt")?
            .context("Failed to execute")?;

        if receipt.status != Some(1.into()) {
            bail!("Transaction {:?} reverted", receipt.transaction_hash);
        }

        Ok(receipt)
    }
}
