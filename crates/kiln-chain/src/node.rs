//! The development chain node.
//!
//! [`spawn`] starts a background tokio task that owns every piece of chain
//! state: the funded account list, deployed contract instances, nonces, and
//! the block counter. Callers talk to it through a clone-able
//! [`NodeHandle`]; each operation is an mpsc request with a oneshot reply,
//! so the caller suspends until the node has confirmed the result. The task
//! processes one request at a time — transactions are serialized in
//! issuance order and no locking is needed anywhere.
//!
//! Accounts are derived deterministically from the genesis mnemonic, so two
//! nodes started from the same [`Genesis`] expose identical account lists.

use crate::contract::{ContractState, ContractType, Revert};
use crate::error::ChainError;
use chrono::{DateTime, Utc};
use kiln_core::{Address, ChainId, TxHash, Wei};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::marker::PhantomData;
use tokio::sync::{mpsc, oneshot};

/// Well-known development mnemonic funding the default local accounts.
pub const DEV_MNEMONIC: &str =
    "test test test test test test test test test test test junk";

/// Intrinsic gas charged for any transaction.
const TX_BASE_GAS: u64 = 21_000;
/// Additional gas charged for a contract-creating transaction.
const CREATE_GAS: u64 = 32_000;
/// Gas charged per byte of calldata.
const CALLDATA_GAS_PER_BYTE: u64 = 16;

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Initial state of a dev node.
#[derive(Debug, Clone)]
pub struct Genesis {
    /// Mnemonic the funded accounts are derived from.
    pub mnemonic: String,
    /// Number of funded accounts.
    pub accounts: u32,
    pub chain_id: ChainId,
    /// Base gas price quoted by the node.
    pub gas_price: Wei,
}

impl Default for Genesis {
    fn default() -> Self {
        Self {
            mnemonic: DEV_MNEMONIC.to_string(),
            accounts: 10,
            chain_id: ChainId(31337),
            gas_price: Wei(8_000_000_000),
        }
    }
}

// ---------------------------------------------------------------------------
// Receipts
// ---------------------------------------------------------------------------

/// Confirmation of a mined transaction. One transaction per block.
#[derive(Debug, Clone, PartialEq)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// Deterministic gas accounting: intrinsic cost plus per-byte calldata
    /// cost, so identical invocations always cost the same.
    pub gas_used: u64,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

type InitFn = Box<dyn FnOnce() -> Result<Box<dyn ContractState>, Revert> + Send>;

enum Request {
    Accounts {
        reply: oneshot::Sender<Vec<Address>>,
    },
    ChainId {
        reply: oneshot::Sender<ChainId>,
    },
    BlockNumber {
        reply: oneshot::Sender<u64>,
    },
    Deploy {
        name: &'static str,
        from: Address,
        init: InitFn,
        reply: oneshot::Sender<Result<(Address, TxReceipt), ChainError>>,
    },
    Call {
        address: Address,
        method: String,
        args: Vec<Value>,
        reply: oneshot::Sender<Result<Value, ChainError>>,
    },
    Send {
        address: Address,
        method: String,
        args: Vec<Value>,
        from: Address,
        reply: oneshot::Sender<Result<TxReceipt, ChainError>>,
    },
}

// ---------------------------------------------------------------------------
// Node task
// ---------------------------------------------------------------------------

struct ChainState {
    chain_id: ChainId,
    accounts: Vec<Address>,
    contracts: HashMap<Address, Box<dyn ContractState>>,
    nonces: HashMap<Address, u64>,
    block_number: u64,
}

/// Start a dev node from `genesis` and return a handle to it.
///
/// The node runs until the last [`NodeHandle`] is dropped; the task then
/// drains and exits. Dropping the node discards all chain state, which is
/// the harness's reset between tests.
pub fn spawn(genesis: Genesis) -> NodeHandle {
    let accounts: Vec<Address> = (0..genesis.accounts)
        .map(|index| derive_account(&genesis.mnemonic, index))
        .collect();

    let mut state = ChainState {
        chain_id: genesis.chain_id,
        accounts,
        contracts: HashMap::new(),
        nonces: HashMap::new(),
        block_number: 0,
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        tracing::info!(chain_id = %state.chain_id, accounts = state.accounts.len(), "dev node started");
        while let Some(request) = rx.recv().await {
            state.handle(request);
        }
        tracing::debug!("dev node shut down");
    });

    NodeHandle { tx }
}

impl ChainState {
    fn handle(&mut self, request: Request) {
        match request {
            Request::Accounts { reply } => {
                let _ = reply.send(self.accounts.clone());
            }
            Request::ChainId { reply } => {
                let _ = reply.send(self.chain_id);
            }
            Request::BlockNumber { reply } => {
                let _ = reply.send(self.block_number);
            }
            Request::Deploy {
                name,
                from,
                init,
                reply,
            } => {
                let _ = reply.send(self.deploy(name, from, init));
            }
            Request::Call {
                address,
                method,
                args,
                reply,
            } => {
                let _ = reply.send(self.view(address, &method, &args));
            }
            Request::Send {
                address,
                method,
                args,
                from,
                reply,
            } => {
                let _ = reply.send(self.transact(address, &method, &args, from));
            }
        }
    }

    fn deploy(
        &mut self,
        name: &'static str,
        from: Address,
        init: InitFn,
    ) -> Result<(Address, TxReceipt), ChainError> {
        self.require_account(from)?;

        let instance = init().map_err(|revert| ChainError::Deploy {
            contract: name,
            reason: revert.reason,
        })?;

        let nonce = self.next_nonce(from);
        let address = derive_contract_address(from, nonce);
        let receipt = self.seal_block(from, "constructor", &[], TX_BASE_GAS + CREATE_GAS);
        self.contracts.insert(address, instance);

        tracing::info!(contract = name, %address, block = receipt.block_number, "deployed");
        Ok((address, receipt))
    }

    fn view(&self, address: Address, method: &str, args: &[Value]) -> Result<Value, ChainError> {
        let contract = self
            .contracts
            .get(&address)
            .ok_or(ChainError::UnknownContract(address))?;
        contract.call(method, args).map_err(|revert| ChainError::Revert {
            address,
            method: method.to_string(),
            reason: revert.reason,
        })
    }

    fn transact(
        &mut self,
        address: Address,
        method: &str,
        args: &[Value],
        from: Address,
    ) -> Result<TxReceipt, ChainError> {
        self.require_account(from)?;
        self.next_nonce(from);

        let calldata = serde_json::to_vec(args).unwrap_or_default();
        let contract = self
            .contracts
            .get_mut(&address)
            .ok_or(ChainError::UnknownContract(address))?;

        contract.send(method, args).map_err(|revert| ChainError::Revert {
            address,
            method: method.to_string(),
            reason: revert.reason,
        })?;

        let gas_used = TX_BASE_GAS + CALLDATA_GAS_PER_BYTE * calldata.len() as u64;
        let receipt = self.seal_block(from, method, &calldata, gas_used);
        tracing::debug!(%address, method, block = receipt.block_number, gas_used, "transaction mined");
        Ok(receipt)
    }

    fn require_account(&self, from: Address) -> Result<(), ChainError> {
        if self.accounts.contains(&from) {
            Ok(())
        } else {
            Err(ChainError::UnknownAccount(from))
        }
    }

    fn next_nonce(&mut self, account: Address) -> u64 {
        let nonce = self.nonces.entry(account).or_insert(0);
        let current = *nonce;
        *nonce += 1;
        current
    }

    fn seal_block(
        &mut self,
        from: Address,
        method: &str,
        calldata: &[u8],
        gas_used: u64,
    ) -> TxReceipt {
        self.block_number += 1;
        TxReceipt {
            tx_hash: tx_hash(self.chain_id, self.block_number, from, method, calldata),
            block_number: self.block_number,
            gas_used,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Clone-able handle to a running dev node.
#[derive(Clone)]
pub struct NodeHandle {
    tx: mpsc::UnboundedSender<Request>,
}

impl NodeHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Request,
    ) -> Result<T, ChainError> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(make(reply)).map_err(|_| ChainError::NodeGone)?;
        rx.await.map_err(|_| ChainError::NodeGone)
    }

    /// The node's funded accounts, in derivation order.
    pub async fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        self.request(|reply| Request::Accounts { reply }).await
    }

    pub async fn chain_id(&self) -> Result<ChainId, ChainError> {
        self.request(|reply| Request::ChainId { reply }).await
    }

    /// Height of the most recently mined block (0 at genesis).
    pub async fn block_number(&self) -> Result<u64, ChainError> {
        self.request(|reply| Request::BlockNumber { reply }).await
    }

    /// Deploy a contract, suspending until the deployment transaction is
    /// confirmed. A reverting constructor yields [`ChainError::Deploy`].
    pub async fn deploy<C: ContractType>(
        &self,
        args: C::InitArgs,
        from: Address,
    ) -> Result<Deployed<C>, ChainError> {
        let init: InitFn =
            Box::new(move || C::construct(args).map(|c| Box::new(c) as Box<dyn ContractState>));
        let (address, receipt) = self
            .request(|reply| Request::Deploy {
                name: C::NAME,
                from,
                init,
                reply,
            })
            .await??;
        Ok(Deployed {
            address,
            receipt,
            caller: from,
            node: self.clone(),
            _contract: PhantomData,
        })
    }

    /// Pure read against a deployed contract. No transaction, no state
    /// change, no block.
    pub async fn call(
        &self,
        address: Address,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, ChainError> {
        self.request(|reply| Request::Call {
            address,
            method: method.to_string(),
            args,
            reply,
        })
        .await?
    }

    /// Mutating invocation, suspending until the transaction is mined.
    pub async fn send(
        &self,
        address: Address,
        method: &str,
        args: Vec<Value>,
        from: Address,
    ) -> Result<TxReceipt, ChainError> {
        self.request(|reply| Request::Send {
            address,
            method: method.to_string(),
            args,
            from,
            reply,
        })
        .await?
    }
}

// ---------------------------------------------------------------------------
// Deployed instances
// ---------------------------------------------------------------------------

/// Typed handle to one deployed contract instance.
///
/// Mutating sends default to the account that deployed the instance; use
/// [`Deployed::send_from`] to send from another account.
pub struct Deployed<C> {
    address: Address,
    receipt: TxReceipt,
    caller: Address,
    node: NodeHandle,
    _contract: PhantomData<fn() -> C>,
}

impl<C> std::fmt::Debug for Deployed<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deployed")
            .field("address", &self.address)
            .field("caller", &self.caller)
            .finish_non_exhaustive()
    }
}

impl<C> Clone for Deployed<C> {
    fn clone(&self) -> Self {
        Self {
            address: self.address,
            receipt: self.receipt.clone(),
            caller: self.caller,
            node: self.node.clone(),
            _contract: PhantomData,
        }
    }
}

impl<C: ContractType> Deployed<C> {
    pub fn address(&self) -> Address {
        self.address
    }

    /// Receipt of the deployment transaction.
    pub fn receipt(&self) -> &TxReceipt {
        &self.receipt
    }

    pub fn node(&self) -> &NodeHandle {
        &self.node
    }

    pub async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, ChainError> {
        self.node.call(self.address, method, args).await
    }

    pub async fn send(&self, method: &str, args: Vec<Value>) -> Result<TxReceipt, ChainError> {
        self.node.send(self.address, method, args, self.caller).await
    }

    pub async fn send_from(
        &self,
        from: Address,
        method: &str,
        args: Vec<Value>,
    ) -> Result<TxReceipt, ChainError> {
        self.node.send(self.address, method, args, from).await
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derive the account address at `index` from a mnemonic.
///
/// Stand-in for BIP-44 key derivation: deterministic and collision-free for
/// test purposes, but not real key material.
pub fn derive_account(mnemonic: &str, index: u32) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(b"kiln/account/");
    hasher.update(mnemonic.as_bytes());
    hasher.update(b"/");
    hasher.update(index.to_be_bytes());
    truncate_to_address(&hasher.finalize())
}

/// Contract addresses depend on deployer and nonce, so repeated deployments
/// from one account land at distinct addresses.
fn derive_contract_address(deployer: Address, nonce: u64) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(b"kiln/contract/");
    hasher.update(deployer.as_bytes());
    hasher.update(nonce.to_be_bytes());
    truncate_to_address(&hasher.finalize())
}

fn tx_hash(
    chain_id: ChainId,
    block_number: u64,
    from: Address,
    method: &str,
    calldata: &[u8],
) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(b"kiln/tx/");
    hasher.update(chain_id.0.to_be_bytes());
    hasher.update(block_number.to_be_bytes());
    hasher.update(from.as_bytes());
    hasher.update(method.as_bytes());
    hasher.update(calldata);
    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    TxHash::from_bytes(bytes)
}

fn truncate_to_address(digest: &[u8]) -> Address {
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[..20]);
    Address::from_bytes(bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
