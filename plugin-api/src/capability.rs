use serde::{Deserialize, Serialize};

/// App-component lifecycles a plugin can declare interest in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    HostComponent,
    Service,
    BroadcastReceiver,
    ContentProvider,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::HostComponent,
        Capability::Service,
        Capability::BroadcastReceiver,
        Capability::ContentProvider,
    ];

    fn bit(self) -> u8 {
        match self {
            Capability::HostComponent => 1 << 0,
            Capability::Service => 1 << 1,
            Capability::BroadcastReceiver => 1 << 2,
            Capability::ContentProvider => 1 << 3,
        }
    }
}

/// The set of capabilities a plugin declared, probed once at registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    pub fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = CapabilitySet::empty();
        for capability in iter {
            set.insert(capability);
        }
        set
    }
}
