#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, watch};

use ua_workshop::account::{
    AccountClient, AccountClientFactory, AccountClientOptions, PrimaryAssets,
    SmartAccountOptions, TargetCall, TransactionId, TransactionIntent,
};
use ua_workshop::config::AppConfig;
use ua_workshop::error::CollaboratorError;
use ua_workshop::session::{SessionController, SessionView};
use ua_workshop::wallet::{WalletConnector, WalletSession};

pub const OWNER_A: &str = "0x1234567890abcdef1234";
pub const OWNER_B: &str = "0xfedcba0987654321fedc";
pub const ROOT_HASH: &str = "0xabababababababababababababababababababababababababababababababab";

/// How a mock account client answers
#[derive(Clone)]
pub struct ClientBehavior {
    pub smart_accounts: Result<SmartAccountOptions, String>,
    pub smart_account_failures: usize,
    pub balance: Result<Decimal, String>,
    pub balance_gate: Option<Arc<Notify>>,
    pub intent_gate: Option<Arc<Notify>>,
    pub root_hash: String,
    pub intent_error: Option<String>,
    pub submit_result: Result<String, String>,
}

impl ClientBehavior {
    pub fn healthy() -> Self {
        Self {
            smart_accounts: Ok(SmartAccountOptions {
                smart_account_address: Some("0xevmsmartaccount000000000000000000000001".into()),
                solana_smart_account_address: Some("SoLSmartAccount1111111111111111111111111".into()),
            }),
            smart_account_failures: 0,
            balance: Ok(Decimal::new(123, 1)),
            balance_gate: None,
            intent_gate: None,
            root_hash: ROOT_HASH.to_string(),
            intent_error: None,
            submit_result: Ok("abc123".to_string()),
        }
    }
}

/// Calls observed by every client a factory built
#[derive(Default)]
pub struct Recorder {
    pub intents: Mutex<Vec<(String, u64, Vec<TargetCall>)>>,
    pub submissions: Mutex<Vec<(String, Vec<u8>)>>,
}

pub struct MockClient {
    owner: String,
    behavior: ClientBehavior,
    remaining_failures: AtomicUsize,
    recorder: Arc<Recorder>,
}

#[async_trait]
impl AccountClient for MockClient {
    fn owner_address(&self) -> &str {
        &self.owner
    }

    async fn smart_account_options(&self) -> Result<SmartAccountOptions, CollaboratorError> {
        let failing = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err("smart account service unavailable".into());
        }
        self.behavior.smart_accounts.clone().map_err(Into::into)
    }

    async fn primary_assets(&self) -> Result<PrimaryAssets, CollaboratorError> {
        if let Some(gate) = &self.behavior.balance_gate {
            gate.notified().await;
        }
        self.behavior
            .balance
            .clone()
            .map(|total_amount_in_usd| PrimaryAssets {
                total_amount_in_usd,
            })
            .map_err(Into::into)
    }

    async fn create_transaction(
        &self,
        chain_id: u64,
        calls: Vec<TargetCall>,
    ) -> Result<TransactionIntent, CollaboratorError> {
        self.recorder
            .intents
            .lock()
            .unwrap()
            .push((self.owner.clone(), chain_id, calls.clone()));
        if let Some(gate) = &self.behavior.intent_gate {
            gate.notified().await;
        }
        if let Some(message) = &self.behavior.intent_error {
            return Err(message.clone().into());
        }
        Ok(TransactionIntent::new(
            chain_id,
            calls,
            self.behavior.root_hash.clone(),
        ))
    }

    async fn send_transaction(
        &self,
        intent: TransactionIntent,
        signature: &[u8],
    ) -> Result<TransactionId, CollaboratorError> {
        self.recorder
            .submissions
            .lock()
            .unwrap()
            .push((intent.root_hash().to_string(), signature.to_vec()));
        self.behavior
            .submit_result
            .clone()
            .map(TransactionId)
            .map_err(Into::into)
    }
}

pub struct MockFactory {
    default_behavior: ClientBehavior,
    behaviors: Mutex<HashMap<String, ClientBehavior>>,
    created: Mutex<Vec<AccountClientOptions>>,
    fail_construction: AtomicBool,
    bound_owner: Mutex<Option<String>>,
    pub recorder: Arc<Recorder>,
}

impl MockFactory {
    pub fn new(default_behavior: ClientBehavior) -> Self {
        Self {
            default_behavior,
            behaviors: Mutex::new(HashMap::new()),
            created: Mutex::new(Vec::new()),
            fail_construction: AtomicBool::new(false),
            bound_owner: Mutex::new(None),
            recorder: Arc::new(Recorder::default()),
        }
    }

    /// Overrides the behavior of clients built for `owner`
    pub fn with_owner(self, owner: &str, behavior: ClientBehavior) -> Self {
        self.behaviors
            .lock()
            .unwrap()
            .insert(owner.to_string(), behavior);
        self
    }

    pub fn set_fail_construction(&self, fail: bool) {
        self.fail_construction.store(fail, Ordering::SeqCst);
    }

    /// Clients report `owner` instead of the requested owner address
    pub fn bind_owner(&self, owner: Option<&str>) {
        *self.bound_owner.lock().unwrap() = owner.map(str::to_string);
    }

    pub fn created(&self) -> Vec<AccountClientOptions> {
        self.created.lock().unwrap().clone()
    }
}

impl AccountClientFactory for MockFactory {
    fn create(
        &self,
        options: AccountClientOptions,
    ) -> Result<Arc<dyn AccountClient>, CollaboratorError> {
        if self.fail_construction.load(Ordering::SeqCst) {
            return Err("project id rejected".into());
        }

        let behavior = self
            .behaviors
            .lock()
            .unwrap()
            .get(&options.owner_address)
            .cloned()
            .unwrap_or_else(|| self.default_behavior.clone());
        let owner = self
            .bound_owner
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| options.owner_address.clone());
        let client = MockClient {
            owner,
            remaining_failures: AtomicUsize::new(behavior.smart_account_failures),
            behavior,
            recorder: Arc::clone(&self.recorder),
        };
        self.created.lock().unwrap().push(options);
        Ok(Arc::new(client))
    }
}

pub struct MockWallet {
    updates: watch::Sender<WalletSession>,
    sign_error: Mutex<Option<String>>,
    sign_gate: Mutex<Option<Arc<Notify>>>,
    pub signed: Mutex<Vec<(String, Vec<u8>)>>,
}

pub const SIGNATURE: [u8; 4] = [0x51, 0x90, 0xaa, 0x01];

impl MockWallet {
    pub fn new() -> Self {
        let (updates, _) = watch::channel(WalletSession::disconnected());
        Self {
            updates,
            sign_error: Mutex::new(None),
            sign_gate: Mutex::new(None),
            signed: Mutex::new(Vec::new()),
        }
    }

    pub fn connect(&self, owner: &str, chain_id: Option<u64>) {
        self.updates
            .send_replace(WalletSession::connected(owner, chain_id));
    }

    pub fn fail_signing(&self, message: Option<&str>) {
        *self.sign_error.lock().unwrap() = message.map(str::to_string);
    }

    /// Signing waits until the returned handle is notified
    pub fn gate_signing(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.sign_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl WalletConnector for MockWallet {
    fn session(&self) -> WalletSession {
        self.updates.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<WalletSession> {
        self.updates.subscribe()
    }

    async fn disconnect(&self) -> Result<(), CollaboratorError> {
        self.updates.send_replace(WalletSession::disconnected());
        Ok(())
    }

    async fn sign_message(
        &self,
        account: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>, CollaboratorError> {
        let gate = self.sign_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.signed
            .lock()
            .unwrap()
            .push((account.to_string(), payload.to_vec()));

        let error = self.sign_error.lock().unwrap().clone();
        match error {
            Some(message) => Err(message.into()),
            None => Ok(SIGNATURE.to_vec()),
        }
    }
}

pub fn controller(wallet: Arc<MockWallet>, factory: Arc<MockFactory>) -> SessionController {
    SessionController::new(Arc::new(AppConfig::default()), wallet, factory)
}

/// Connects `owner` and waits for both lookups to settle
pub async fn connect(controller: &SessionController, owner: &str) -> SessionView {
    if let Some(tasks) = controller
        .on_wallet_changed(WalletSession::connected(owner, Some(8453)))
        .await
    {
        tasks.join().await;
    }
    controller.view().await
}

/// Polls the controller until `check` holds
pub async fn wait_for<F>(controller: &SessionController, check: F) -> SessionView
where
    F: Fn(&SessionView) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let view = controller.view().await;
            if check(&view) {
                return view;
            }
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time")
}
