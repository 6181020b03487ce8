//! # Links Module
//!
//! Holds the subsystem instances for one chain and the state of the block
//! being executed. Message handlers, packet callbacks and queries are
//! implemented on [`LinksModule`] in `handlers/` and `queries.rs`.

use crate::container::config::LinksConfig;
use crate::errors::{ConfigError, RuntimeError};
use pl_01_proof_verification::ProofVerifier;
use pl_02_link_storage::{codec_by_name, KeyValueStore, LinkStore};
use pl_03_app_link_verification::ExpirySweeper;
use pl_04_oracle_relay::{
    AccountKeys, ChainLinkPacketHandler, OracleRelay, PacketDispatcher, PacketTransport, RelayEnv,
};
use shared_types::{BlockContext, EventManager, LinkEvent};
use tracing::{debug, info};

/// Link module instance.
pub struct LinksModule<S: KeyValueStore, T: PacketTransport> {
    pub(crate) config: LinksConfig,
    pub(crate) store: LinkStore<S>,
    pub(crate) transport: T,
    pub(crate) accounts: Box<dyn AccountKeys>,
    pub(crate) relay: OracleRelay,
    pub(crate) dispatcher: PacketDispatcher<S>,
    pub(crate) verifier: ProofVerifier,
    sweeper: ExpirySweeper,
    pub(crate) block: BlockContext,
    events: EventManager,
}

impl<S: KeyValueStore, T: PacketTransport> LinksModule<S, T> {
    /// Build the module over a key-value backend, a transport and the
    /// account key registry.
    pub fn new(
        config: LinksConfig,
        kv: S,
        transport: T,
        accounts: Box<dyn AccountKeys>,
    ) -> Result<Self, RuntimeError> {
        config.validate()?;
        let codec = codec_by_name(&config.storage.codec)
            .ok_or_else(|| ConfigError::UnknownCodec(config.storage.codec.clone()))?;

        let relay = OracleRelay::new(
            config.oracle.clone(),
            config.app_links.validity_duration_secs,
        );
        let dispatcher = PacketDispatcher::new()
            .with_handler(ChainLinkPacketHandler::new())
            .with_handler(relay.clone());

        info!(
            codec = %config.storage.codec,
            oracle_script = config.oracle.script_id,
            validity_secs = config.app_links.validity_duration_secs,
            "[runtime] links module initialized"
        );
        Ok(Self {
            store: LinkStore::new(kv, codec),
            transport,
            accounts,
            relay,
            dispatcher,
            verifier: ProofVerifier::new(),
            sweeper: ExpirySweeper::new(),
            block: BlockContext::default(),
            events: EventManager::new(),
            config,
        })
    }

    // =========================================================================
    // BLOCK LIFECYCLE
    // =========================================================================

    /// Enter `block` and sweep expired application links. Returns the number
    /// of links removed.
    pub fn begin_block(&mut self, block: BlockContext) -> Result<usize, RuntimeError> {
        self.block = block;
        let mut events = EventManager::new();
        let swept = self
            .sweeper
            .run_once_per_block(&mut self.store, &mut events, block.time);
        let swept = self.commit(events, swept.map_err(RuntimeError::from))?;
        debug!(height = block.height, time = block.time, swept, "[runtime] begin block");
        Ok(swept)
    }

    /// Close the current block and hand out its events.
    pub fn end_block(&mut self) -> Vec<LinkEvent> {
        let events = self.events.drain();
        debug!(height = self.block.height, events = events.len(), "[runtime] end block");
        events
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Active configuration.
    pub fn config(&self) -> &LinksConfig {
        &self.config
    }

    /// Link storage.
    pub fn store(&self) -> &LinkStore<S> {
        &self.store
    }

    /// Packet transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable packet transport, for relayers driving the counterparty side.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Events committed so far in the current block.
    pub fn events(&self) -> &[LinkEvent] {
        self.events.events()
    }

    /// Block being executed.
    pub fn block(&self) -> BlockContext {
        self.block
    }

    // =========================================================================
    // TRANSACTIONS
    // =========================================================================

    /// Keep `events` only when the transaction succeeded.
    pub(crate) fn commit<R>(
        &mut self,
        events: EventManager,
        result: Result<R, RuntimeError>,
    ) -> Result<R, RuntimeError> {
        if result.is_ok() {
            self.events.absorb(events);
        }
        result
    }

    /// Run `f` against the packet environment with a fresh event collector.
    pub(crate) fn with_env<R>(
        &mut self,
        f: impl FnOnce(&PacketDispatcher<S>, &mut RelayEnv<'_, S>) -> Result<R, RuntimeError>,
    ) -> Result<R, RuntimeError> {
        let mut events = EventManager::new();
        let result = {
            let mut env = RelayEnv {
                store: &mut self.store,
                events: &mut events,
                block: self.block,
                accounts: &*self.accounts,
            };
            f(&self.dispatcher, &mut env)
        };
        self.commit(events, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pl_02_link_storage::InMemoryKVStore;
    use pl_04_oracle_relay::{InMemoryAccountKeys, LoopbackTransport};

    fn module(config: LinksConfig) -> Result<LinksModule<InMemoryKVStore, LoopbackTransport>, RuntimeError> {
        LinksModule::new(
            config,
            InMemoryKVStore::new(),
            LoopbackTransport::new(),
            Box::new(InMemoryAccountKeys::new()),
        )
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = LinksConfig::default();
        config.oracle.ask_count = 0;
        assert!(matches!(module(config), Err(RuntimeError::Config(_))));
    }

    #[test]
    fn test_new_rejects_unknown_codec() {
        let mut config = LinksConfig::default();
        config.storage.codec = "yaml".to_string();
        assert!(matches!(
            module(config),
            Err(RuntimeError::Config(ConfigError::UnknownCodec(_)))
        ));
    }

    #[test]
    fn test_begin_block_on_empty_store() {
        let mut module = module(LinksConfig::default()).unwrap();
        assert_eq!(module.begin_block(BlockContext::new(7, 70)).unwrap(), 0);
        assert_eq!(module.block(), BlockContext::new(7, 70));
        assert!(module.end_block().is_empty());
    }

    #[test]
    fn test_failed_transaction_drops_its_events() {
        let mut module = module(LinksConfig::default()).unwrap();
        let mut events = EventManager::new();
        events.emit(LinkEvent::ChainLinkDeleted {
            user: "desmos1owner".to_string(),
            chain: "cosmos".to_string(),
            address: "cosmos1xyz".to_string(),
        });
        let failed: Result<(), RuntimeError> = Err(RuntimeError::Validation("no".to_string()));
        assert!(module.commit(events.clone(), failed).is_err());
        assert!(module.events().is_empty());

        module.commit(events, Ok(())).unwrap();
        assert_eq!(module.events().len(), 1);
    }
}
