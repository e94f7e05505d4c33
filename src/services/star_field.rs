/// Star field generation for the scene backgrounds.
///
/// The random source is injected so scenes use the thread-local generator
/// while tests pin a seeded one.
use crate::models::{StarDescriptor, StarFieldProfile};
use rand::Rng;
use std::ops::Range;

/// Generate `count` stars with the home scene ranges
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<StarDescriptor> {
    generate_with(&StarFieldProfile::cosmic(), count, rng)
}

/// Generate `count` stars, every field drawn independently and uniformly from `profile`
pub fn generate_with<R: Rng + ?Sized>(
    profile: &StarFieldProfile,
    count: usize,
    rng: &mut R,
) -> Vec<StarDescriptor> {
    (0..count)
        .map(|i| {
            let star = StarDescriptor {
                id: format!("star-{}", i),
                x: sample(rng, &profile.x),
                y: sample(rng, &profile.y),
                size: sample(rng, &profile.size),
                opacity: sample(rng, &profile.opacity),
                twinkle_duration_secs: sample(rng, &profile.twinkle_duration_secs),
                blur_radius: sample(rng, &profile.blur_radius),
            };
            debug_assert!(profile.contains(&star), "{} outside its profile", star.id);
            star
        })
        .collect()
}

/// Scene entry point: fresh star field from the thread-local generator
pub fn generate_stars(profile: &StarFieldProfile, count: usize) -> Vec<StarDescriptor> {
    let stars = generate_with(profile, count, &mut rand::rng());
    log::debug!("[StarField] Generated {} stars", stars.len());
    stars
}

/// Faint line segments joining the first `lines + 1` stars left to right.
///
/// Endpoints are in the same percent space as the star positions. Fewer stars
/// than needed yields fewer segments.
pub fn constellation(stars: &[StarDescriptor], lines: usize) -> Vec<((f32, f32), (f32, f32))> {
    let mut anchors: Vec<(f32, f32)> = stars
        .iter()
        .take(lines + 1)
        .map(|s| (s.x, s.y))
        .collect();
    anchors.sort_by(|a, b| a.0.total_cmp(&b.0));
    anchors.windows(2).map(|w| (w[0], w[1])).collect()
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: &Range<f32>) -> f32 {
    if range.is_empty() {
        return range.start;
    }
    // random_range on floats can round up to `end`; keep the upper bound exclusive
    let value = rng.random_range(range.clone());
    if value >= range.end {
        range.start
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn returns_exactly_count_stars_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let profile = StarFieldProfile::cosmic();
        for count in [1usize, 2, 80, 150, 500] {
            let stars = generate(count, &mut rng);
            assert_eq!(stars.len(), count);
            for star in &stars {
                assert!(profile.contains(star), "out of range: {:?}", star);
            }
        }
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(0, &mut rng).is_empty());
    }

    #[test]
    fn ids_follow_index_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let stars = generate(4, &mut rng);
        let ids: Vec<&str> = stars.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["star-0", "star-1", "star-2", "star-3"]);
    }

    #[test]
    fn two_unseeded_fields_differ_but_stay_in_range() {
        let profile = StarFieldProfile::cosmic();
        let first = generate_stars(&profile, 150);
        let second = generate_stars(&profile, 150);

        assert_eq!(first.len(), 150);
        assert_eq!(second.len(), 150);
        assert!(first.iter().chain(second.iter()).all(|s| profile.contains(s)));
        assert_ne!(first, second);
    }

    #[test]
    fn same_seed_reproduces_the_field() {
        let a = generate(40, &mut StdRng::seed_from_u64(42));
        let b = generate(40, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn constellation_chains_left_to_right() {
        let stars = generate_with(&StarFieldProfile::login(), 80, &mut StdRng::seed_from_u64(5));
        let lines = constellation(&stars, 15);
        assert_eq!(lines.len(), 15);
        for pair in lines.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert!(lines.iter().all(|(a, b)| a.0 <= b.0));

        assert_eq!(constellation(&stars[..3], 15).len(), 2);
        assert!(constellation(&[], 15).is_empty());
    }

    #[test]
    fn login_profile_pins_blur_and_dims_stars() {
        let profile = StarFieldProfile::login();
        let stars = generate_with(&profile, 80, &mut StdRng::seed_from_u64(9));
        assert_eq!(stars.len(), 80);
        for star in &stars {
            assert_eq!(star.blur_radius, 0.0);
            assert!(star.opacity < 0.4);
            assert!(star.size < 1.0);
        }
    }
}
