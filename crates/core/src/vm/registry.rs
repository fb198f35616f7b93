//! Registry mapping [`VmType`] tags to engine constructors.
//!
//! An explicit, owned object rather than process-global state: whoever builds
//! the manager builds the registry, registers the engine variants it should
//! offer, and hands it over. Requesting an unregistered tag is a hard error,
//! never a silent substitution.

use crate::common::VmError;
use crate::config::Config;
use crate::pipeline::PipelinedVm;
use crate::vm::{SingleCycleVm, Vm, VmType};
use std::collections::HashMap;
use tracing::debug;

/// A constructor producing a fresh engine.
pub type VmFactory = Box<dyn Fn() -> Box<dyn Vm> + Send>;

/// Maps VM type tags to constructors.
pub struct VmRegistry {
    factories: HashMap<VmType, VmFactory>,
}

impl VmRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry with both built-in engines registered, constructed
    /// from a snapshot of `config`.
    pub fn with_default_vms(config: &Config) -> Self {
        let mut registry = Self::new();

        let single = config.clone();
        registry.register(
            VmType::SingleCycle,
            Box::new(move || Box::new(SingleCycleVm::new(&single))),
        );

        let pipelined = config.clone();
        registry.register(
            VmType::Pipelined,
            Box::new(move || Box::new(PipelinedVm::new(&pipelined))),
        );

        registry
    }

    /// Registers a constructor for `vm_type`.
    ///
    /// Registering the same tag again replaces the previous constructor;
    /// the last registration wins.
    pub fn register(&mut self, vm_type: VmType, factory: VmFactory) {
        if self.factories.insert(vm_type, factory).is_some() {
            debug!(?vm_type, "VM constructor replaced");
        }
    }

    /// Constructs a fresh engine for `vm_type`.
    ///
    /// # Errors
    ///
    /// [`VmError::UnknownVmType`] if no constructor is registered for the tag.
    pub fn create(&self, vm_type: VmType) -> Result<Box<dyn Vm>, VmError> {
        self.factories
            .get(&vm_type)
            .map(|factory| factory())
            .ok_or(VmError::UnknownVmType(vm_type))
    }

    /// Whether a constructor is registered for `vm_type`.
    pub fn contains(&self, vm_type: VmType) -> bool {
        self.factories.contains_key(&vm_type)
    }
}

impl Default for VmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VmRegistry")
            .field("registered", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
