use rand::Rng;
use uuid::{Builder, Uuid};

/// A random version-4 UUID drawn from `rng`, so a seeded generator yields a repeatable set.
pub fn random_identifier(rng: &mut dyn Rng) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}

#[cfg(test)]
mod tests {
    use flow_sigil::seed::Seeds;
    use rand::rngs::ChaCha8Rng;
    use rand::SeedableRng;
    use uuid::{Variant, Version};

    use super::*;

    #[test]
    fn identifiers_are_rfc4122_v4() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5161);
        for _ in 0..32 {
            let id = random_identifier(&mut rng);
            assert_eq!(id.get_version(), Some(Version::Random));
            assert_eq!(id.get_variant(), Variant::RFC4122);

            let text = id.to_string();
            assert_eq!(text.len(), 36);
            assert_eq!(Uuid::parse_str(&text).unwrap(), id);
            assert!(Seeds::derive(&text).is_ok());
        }
    }

    #[test]
    fn identifiers_keep_all_drawn_bytes() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut raw = [0u8; 16];
        rng.fill_bytes(&mut raw);

        let id = random_identifier(&mut ChaCha8Rng::seed_from_u64(3));
        let bytes = id.as_bytes();
        for (i, (&got, &want)) in bytes.iter().zip(raw.iter()).enumerate() {
            match i {
                6 => assert_eq!(got & 0x0f, want & 0x0f),
                8 => assert_eq!(got & 0x3f, want & 0x3f),
                _ => assert_eq!(got, want, "byte {i}"),
            }
        }
    }

    #[test]
    fn same_seed_same_identifiers() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..8 {
            assert_eq!(random_identifier(&mut a), random_identifier(&mut b));
        }
    }
}
