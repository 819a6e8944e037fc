// ============================================================================
// STELLAR-FUNDING - Transfer Transaction
// ============================================================================
// Builds the Stellar Asset Contract `transfer(from, to, amount)` invocation
// and carries it through its stages. Each stage is its own type and every
// transition consumes the previous stage:
//
//   BuiltTransaction -> SimulatedTransaction -> AssembledTransaction
//                    -> SignedTransaction    -> SubmittedTransaction
//
// so an envelope cannot be signed before it is assembled, or submitted
// before it is signed.
// ============================================================================

use crate::amount::TransferAmount;
use crate::config::FundingConfig;
use crate::error::FundingError;
use crate::keypair::BurnerAccount;
use crate::rpc::{AccountRecord, SendTransactionResponse, SimulateTransactionResponse};
use crate::strkey::{decode_account_id, decode_contract_id};
use crate::xdr::from_base64;
use crate::Result;
use sha2::{Digest, Sha256};
use stellar_xdr::curr::{
    AccountId, DecoratedSignature, Hash, HostFunction, InvokeContractArgs, InvokeHostFunctionOp,
    Limits, Memo, MuxedAccount, Operation, OperationBody, Preconditions, PublicKey, ScAddress,
    ScSymbol, ScVal, SequenceNumber, Signature, SignatureHint, SorobanAuthorizationEntry,
    SorobanTransactionData, TimeBounds, TimePoint, Transaction, TransactionEnvelope,
    TransactionExt, TransactionSignaturePayload, TransactionSignaturePayloadTaggedTransaction,
    TransactionV1Envelope, Uint256, VecM, WriteXdr,
};
use tracing::debug;

/// SAC entry point used for bridging
pub const TRANSFER_FN: &str = "transfer";

// ============================================================================
// ADDRESS ENCODING
// ============================================================================

/// Encode a G... or C... address as a contract-call argument
pub fn sc_address(address: &str) -> Result<ScAddress> {
    if address.starts_with('G') {
        let key = decode_account_id(address)?;
        Ok(ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(key)))))
    } else if address.starts_with('C') {
        Ok(ScAddress::Contract(Hash(decode_contract_id(address)?)))
    } else {
        Err(FundingError::validation(format!("Unsupported address: {}", address)))
    }
}

/// The contract call carried by a single-operation envelope, if any
pub fn invoke_contract_args(envelope: &TransactionEnvelope) -> Option<&InvokeContractArgs> {
    let tx = match envelope {
        TransactionEnvelope::Tx(v1) => &v1.tx,
        _ => return None,
    };
    match &tx.operations.first()?.body {
        OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(args),
            ..
        }) => Some(args),
        _ => None,
    }
}

struct TransferCall {
    from: String,
    to: String,
    amount: TransferAmount,
}

// ============================================================================
// TRANSACTION BUILDER
// ============================================================================

/// Builder for the bridging transfer
pub struct TransferBuilder {
    network_passphrase: String,
    contract: String,
    source_account: String,
    sequence: i64,
    fee: u32,
    timeout_seconds: u64,
    call: Option<TransferCall>,
}

impl TransferBuilder {
    /// Create new builder from the source account's current ledger state
    pub fn new(config: &FundingConfig, source_account: &AccountRecord) -> Self {
        Self {
            network_passphrase: config.network_passphrase.clone(),
            contract: config.native_asset_contract.clone(),
            source_account: source_account.account_id.clone(),
            sequence: source_account.sequence,
            fee: config.base_fee,
            timeout_seconds: config.tx_timeout_secs,
            call: None,
        }
    }

    /// Set base fee per operation (in stroops)
    pub fn fee(mut self, fee: u32) -> Self {
        self.fee = fee;
        self
    }

    /// Set validity window
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Call `transfer(from, to, amount)` on the asset contract
    pub fn transfer(mut self, from: &str, to: &str, amount: TransferAmount) -> Self {
        self.call = Some(TransferCall {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        });
        self
    }

    /// Build the unsigned transaction. No network access.
    pub fn build(self) -> Result<BuiltTransaction> {
        let call = self.call.ok_or_else(|| {
            FundingError::validation("Transaction must have a transfer operation")
        })?;

        let source_key = decode_account_id(&self.source_account)?;
        let contract_hash = decode_contract_id(&self.contract)?;

        let args: VecM<ScVal> = vec![
            ScVal::Address(sc_address(&call.from)?),
            ScVal::Address(sc_address(&call.to)?),
            call.amount.to_sc_val(),
        ]
        .try_into()?;

        let operation = Operation {
            source_account: None,
            body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
                host_function: HostFunction::InvokeContract(InvokeContractArgs {
                    contract_address: ScAddress::Contract(Hash(contract_hash)),
                    function_name: ScSymbol(TRANSFER_FN.try_into()?),
                    args,
                }),
                auth: VecM::default(),
            }),
        };

        let seq_num = self
            .sequence
            .checked_add(1)
            .ok_or_else(|| FundingError::Internal("Sequence number overflow".to_string()))?;

        let max_time = chrono::Utc::now().timestamp().max(0) as u64 + self.timeout_seconds;

        let tx = Transaction {
            source_account: MuxedAccount::Ed25519(Uint256(source_key)),
            fee: self.fee,
            seq_num: SequenceNumber(seq_num),
            cond: Preconditions::Time(TimeBounds {
                min_time: TimePoint(0),
                max_time: TimePoint(max_time),
            }),
            memo: Memo::None,
            operations: vec![operation].try_into()?,
            ext: TransactionExt::V0,
        };

        debug!(
            "Built transfer of {} stroops {} -> {}",
            call.amount.stroops(),
            call.from,
            call.to
        );

        Ok(BuiltTransaction {
            network_passphrase: self.network_passphrase,
            tx,
        })
    }
}

// ============================================================================
// STAGES
// ============================================================================

/// Unsigned, unsimulated transaction
#[derive(Debug, Clone)]
pub struct BuiltTransaction {
    network_passphrase: String,
    tx: Transaction,
}

impl BuiltTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    /// Unsigned envelope, as sent to `simulateTransaction`
    pub fn envelope(&self) -> TransactionEnvelope {
        unsigned_envelope(self.tx.clone())
    }

    /// Accept a simulation result. Fails if the simulation reported an
    /// execution error or returned undecodable resource data.
    pub fn simulated(self, sim: &SimulateTransactionResponse) -> Result<SimulatedTransaction> {
        let diagnostic = || serde_json::to_string(sim).unwrap_or_else(|e| e.to_string());

        if sim.error.is_some() {
            return Err(FundingError::Simulation { diagnostic: diagnostic() });
        }

        let data = sim.transaction_data.as_deref().ok_or_else(|| FundingError::Simulation {
            diagnostic: format!("missing transactionData: {}", diagnostic()),
        })?;
        let soroban_data: SorobanTransactionData =
            from_base64(data).map_err(|e| FundingError::Simulation {
                diagnostic: format!("invalid transactionData: {}", e),
            })?;

        let min_resource_fee = match sim.min_resource_fee.as_deref() {
            Some(fee) => fee.parse::<i64>().map_err(|e| FundingError::Simulation {
                diagnostic: format!("invalid minResourceFee {:?}: {}", fee, e),
            })?,
            None => soroban_data.resource_fee,
        };

        let auth = sim
            .results
            .first()
            .map(|r| r.auth.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|entry| from_base64::<SorobanAuthorizationEntry>(entry))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| FundingError::Simulation {
                diagnostic: format!("invalid auth entry: {}", e),
            })?;

        Ok(SimulatedTransaction {
            network_passphrase: self.network_passphrase,
            tx: self.tx,
            soroban_data,
            min_resource_fee,
            auth,
        })
    }
}

/// Transaction plus the simulation's footprint, auth and fees
#[derive(Debug, Clone)]
pub struct SimulatedTransaction {
    network_passphrase: String,
    tx: Transaction,
    soroban_data: SorobanTransactionData,
    min_resource_fee: i64,
    auth: Vec<SorobanAuthorizationEntry>,
}

impl SimulatedTransaction {
    pub fn min_resource_fee(&self) -> i64 {
        self.min_resource_fee
    }

    /// Merge simulation results: Soroban data, resource fee, and auth
    /// entries for invocations that carry none yet.
    pub fn assemble(self) -> Result<AssembledTransaction> {
        let mut tx = self.tx;

        let fee = tx.fee as i64 + self.min_resource_fee.max(0);
        tx.fee = u32::try_from(fee).unwrap_or(u32::MAX);
        tx.ext = TransactionExt::V1(self.soroban_data);

        let mut operations = tx.operations.to_vec();
        for op in operations.iter_mut() {
            if let OperationBody::InvokeHostFunction(invoke) = &mut op.body {
                if invoke.auth.is_empty() && !self.auth.is_empty() {
                    invoke.auth = self.auth.clone().try_into()?;
                }
            }
        }
        tx.operations = operations.try_into()?;

        Ok(AssembledTransaction {
            network_passphrase: self.network_passphrase,
            tx,
        })
    }
}

/// Fee-correct transaction, ready for signing
#[derive(Debug, Clone)]
pub struct AssembledTransaction {
    network_passphrase: String,
    tx: Transaction,
}

impl AssembledTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    /// sha256 of the signature payload; also the network transaction hash
    pub fn hash(&self) -> Result<[u8; 32]> {
        let network_id = Hash(Sha256::digest(self.network_passphrase.as_bytes()).into());

        let payload = TransactionSignaturePayload {
            network_id,
            tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(self.tx.clone()),
        };

        let payload_bytes = payload.to_xdr(Limits::none())?;
        Ok(Sha256::digest(&payload_bytes).into())
    }

    /// Sign with the burner key (single signer)
    pub fn sign(self, signer: &BurnerAccount) -> Result<SignedTransaction> {
        let hash = self.hash()?;
        let signature = signer.sign(&hash);

        let decorated = DecoratedSignature {
            hint: SignatureHint(signer.signature_hint()),
            signature: Signature(signature.to_vec().try_into()?),
        };

        let envelope = TransactionEnvelope::Tx(TransactionV1Envelope {
            tx: self.tx,
            signatures: vec![decorated].try_into()?,
        });

        Ok(SignedTransaction {
            envelope,
            hash: hex::encode(hash),
        })
    }
}

/// Signed envelope, ready for `sendTransaction`
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    envelope: TransactionEnvelope,
    hash: String,
}

impl SignedTransaction {
    pub fn envelope(&self) -> &TransactionEnvelope {
        &self.envelope
    }

    /// Hex transaction hash
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Record the network's answer. Only `PENDING` counts as accepted.
    pub fn submitted(self, response: SendTransactionResponse) -> Result<SubmittedTransaction> {
        if !response.is_pending() {
            let raw = serde_json::to_string(&response).unwrap_or_else(|e| e.to_string());
            return Err(FundingError::Submission {
                status: Some(response.status),
                raw,
            });
        }

        let hash = if response.hash.is_empty() {
            self.hash
        } else {
            response.hash.clone()
        };

        Ok(SubmittedTransaction { hash, response })
    }
}

/// Accepted into the network's pending queue
#[derive(Debug, Clone)]
pub struct SubmittedTransaction {
    hash: String,
    response: SendTransactionResponse,
}

impl SubmittedTransaction {
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn response(&self) -> &SendTransactionResponse {
        &self.response
    }
}

fn unsigned_envelope(tx: Transaction) -> TransactionEnvelope {
    TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: VecM::default(),
    })
}
