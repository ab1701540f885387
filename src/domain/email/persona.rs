//! Sender personas for trade correspondence.
//!
//! Trades deal with many owners. Each owner is represented by one named
//! persona for every trade-facing email, so a plumber quoting on three jobs
//! for the same owner hears from the same "person" each time.
//!
//! Assignment is a pure function of the owner's id: 32-bit FNV-1a over the
//! UTF-8 bytes of the id, reduced modulo the pool size.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ActorId;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// A sender identity presented to trades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPersona {
    pub display_name: String,
    pub role_title: String,
    pub address: String,
    pub signature: String,
}

struct PersonaTemplate {
    display_name: &'static str,
    role_title: &'static str,
    local_part: &'static str,
}

const PERSONA_POOL: &[PersonaTemplate] = &[
    PersonaTemplate {
        display_name: "Sarah Mitchell",
        role_title: "Property Coordinator",
        local_part: "sarah.mitchell",
    },
    PersonaTemplate {
        display_name: "James Cooper",
        role_title: "Maintenance Coordinator",
        local_part: "james.cooper",
    },
    PersonaTemplate {
        display_name: "Priya Sharma",
        role_title: "Property Manager",
        local_part: "priya.sharma",
    },
    PersonaTemplate {
        display_name: "Tom Nguyen",
        role_title: "Operations Coordinator",
        local_part: "tom.nguyen",
    },
];

/// Number of personas in the pool.
pub fn persona_pool_size() -> usize {
    PERSONA_POOL.len()
}

/// 32-bit FNV-1a.
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Pool index for an owner.
pub fn persona_index(actor_id: &ActorId) -> usize {
    fnv1a_32(actor_id.as_str().as_bytes()) as usize % PERSONA_POOL.len()
}

/// The persona representing `actor_id`, addressed at `domain`.
pub fn persona_for(actor_id: &ActorId, domain: &str) -> EmailPersona {
    let template = &PERSONA_POOL[persona_index(actor_id)];
    EmailPersona {
        display_name: template.display_name.to_string(),
        role_title: template.role_title.to_string(),
        address: format!("{}@{}", template.local_part, domain),
        signature: format!("{}\n{}", template.display_name, template.role_title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: &str) -> ActorId {
        ActorId::new(id).unwrap()
    }

    #[test]
    fn fnv1a_matches_reference_vectors() {
        assert_eq!(fnv1a_32(b""), 0x811c9dc5);
        assert_eq!(fnv1a_32(b"a"), 0xe40c292c);
        assert_eq!(fnv1a_32(b"foobar"), 0xbf9cf968);
    }

    #[test]
    fn same_actor_gets_same_persona() {
        let a = actor("owner-alpha");
        assert_eq!(persona_for(&a, "mail.test"), persona_for(&a, "mail.test"));
    }

    #[test]
    fn owners_spread_across_pool() {
        let indices: std::collections::HashSet<usize> = (0..64)
            .map(|i| persona_index(&actor(&format!("owner-{}", i))))
            .collect();
        assert_eq!(indices.len(), persona_pool_size());
    }

    #[test]
    fn persona_address_uses_domain() {
        let p = persona_for(&actor("owner-1"), "agents.rentwise.test");
        assert!(p.address.ends_with("@agents.rentwise.test"));
        assert!(p.signature.starts_with(&p.display_name));
    }

    #[test]
    fn pool_has_four_personas() {
        assert_eq!(persona_pool_size(), 4);
    }
}
