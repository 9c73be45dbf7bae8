//! Magic-bitboard attack tables for sliding pieces.
//!
//! For every square the relevant occupancy mask (the piece's rays without the board edge)
//! is hashed with `((occupancy & mask) * magic) >> (64 - bits)` into a per-square slice of
//! a shared attack array. The fixed magics below are checked for collisions when the table
//! is built; a square whose magic fails the check gets a freshly searched one instead.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::MagicError;

/// Candidates sampled per square before the finder gives up.
pub const MAX_MAGIC_TRIES: u64 = 100_000_000;

/// Seed for regenerating magics that fail verification.
const REGENERATION_SEED: u64 = 0x5EED_4D41_4749_4300;

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The two sliding movement patterns with their own magic tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SliderKind {
    Bishop,
    Rook,
}

impl SliderKind {
    fn directions(self) -> &'static [(i8, i8); 4] {
        match self {
            SliderKind::Bishop => &BISHOP_DIRECTIONS,
            SliderKind::Rook => &ROOK_DIRECTIONS,
        }
    }

    fn fixed_magics(self) -> &'static [u64; 64] {
        match self {
            SliderKind::Bishop => &BISHOP_MAGICS,
            SliderKind::Rook => &ROOK_MAGICS,
        }
    }
}

/// Squares along the slider's rays from `square`, excluding the last square of each ray.
pub(crate) fn relevant_mask(square: usize, slider: SliderKind) -> u64 {
    let rank = (square / 8) as i8;
    let file = (square % 8) as i8;
    let mut mask = 0u64;
    for &(dr, df) in slider.directions() {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&(r + dr)) && (0..8).contains(&(f + df)) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

/// Ray-cast attacks: each ray runs until (and including) the first occupied square.
pub(crate) fn slow_attacks(square: usize, occupancy: u64, slider: SliderKind) -> u64 {
    let rank = (square / 8) as i8;
    let file = (square % 8) as i8;
    let mut attacks = 0u64;
    for &(dr, df) in slider.directions() {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

/// The `index`-th subset of `mask`: bit `i` of `index` selects the `i`-th lowest mask square.
pub(crate) fn occupancy_from_index(index: usize, mut mask: u64) -> u64 {
    let mut occupancy = 0u64;
    let mut bit = 0;
    while mask != 0 {
        let lowest = mask & mask.wrapping_neg();
        mask ^= lowest;
        if index & (1 << bit) != 0 {
            occupancy |= lowest;
        }
        bit += 1;
    }
    occupancy
}

#[inline]
fn magic_index(occupancy: u64, magic: u64, bits: u32) -> usize {
    (occupancy.wrapping_mul(magic) >> (64 - bits)) as usize
}

/// Every blocker configuration of `mask` paired with its true attack set.
fn blocker_configurations(square: usize, mask: u64, slider: SliderKind) -> Vec<(u64, u64)> {
    (0..1usize << mask.count_ones())
        .map(|index| {
            let occupancy = occupancy_from_index(index, mask);
            (occupancy, slow_attacks(square, occupancy, slider))
        })
        .collect()
}

/// True if `magic` maps no two configurations with different attacks to one slot.
fn is_collision_free(configs: &[(u64, u64)], magic: u64, bits: u32, used: &mut [u64]) -> bool {
    used.iter_mut().for_each(|slot| *slot = 0);
    for &(occupancy, attacks) in configs {
        let slot = &mut used[magic_index(occupancy, magic, bits)];
        if *slot == 0 {
            *slot = attacks;
        } else if *slot != attacks {
            return false;
        }
    }
    true
}

pub(crate) fn verify_magic(square: usize, slider: SliderKind, magic: u64) -> bool {
    let mask = relevant_mask(square, slider);
    let bits = mask.count_ones();
    let configs = blocker_configurations(square, mask, slider);
    let mut used = vec![0u64; 1 << bits];
    is_collision_free(&configs, magic, bits, &mut used)
}

/// Search for a collision-free magic multiplier for `square` by random sampling.
///
/// Candidates are sparse (the AND of three random words) and are skipped early when the
/// product with the mask leaves fewer than six bits in the top byte.
pub fn find_magic<R: Rng>(
    square: u8,
    slider: SliderKind,
    rng: &mut R,
) -> Result<u64, MagicError> {
    let sq = usize::from(square & 63);
    let mask = relevant_mask(sq, slider);
    let bits = mask.count_ones();
    let configs = blocker_configurations(sq, mask, slider);
    let mut used = vec![0u64; 1 << bits];

    for _ in 0..MAX_MAGIC_TRIES {
        let candidate = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if (mask.wrapping_mul(candidate) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }
        if is_collision_free(&configs, candidate, bits, &mut used) {
            return Ok(candidate);
        }
    }

    Err(MagicError::NotFound {
        square,
        slider,
        tries: MAX_MAGIC_TRIES,
    })
}

#[derive(Clone, Copy)]
struct MagicEntry {
    mask: u64,
    magic: u64,
    bits: u32,
    offset: usize,
}

pub(crate) struct MagicTable {
    entries: [MagicEntry; 64],
    attacks: Vec<u64>,
}

impl MagicTable {
    fn build(slider: SliderKind) -> Self {
        let mut rng = StdRng::seed_from_u64(REGENERATION_SEED);
        let mut entries = [MagicEntry {
            mask: 0,
            magic: 0,
            bits: 0,
            offset: 0,
        }; 64];
        let mut attacks = Vec::new();

        for (square, entry) in entries.iter_mut().enumerate() {
            let mask = relevant_mask(square, slider);
            let bits = mask.count_ones();
            let configs = blocker_configurations(square, mask, slider);
            let mut used = vec![0u64; 1 << bits];

            let mut magic = slider.fixed_magics()[square];
            if !is_collision_free(&configs, magic, bits, &mut used) {
                log::warn!("fixed {slider:?} magic for square {square} collides, searching");
                magic = match find_magic(square as u8, slider, &mut rng) {
                    Ok(found) => found,
                    Err(err) => panic!("{err}"),
                };
            }

            *entry = MagicEntry {
                mask,
                magic,
                bits,
                offset: attacks.len(),
            };
            attacks.resize(attacks.len() + (1 << bits), 0);
            for &(occupancy, attack) in &configs {
                attacks[entry.offset + magic_index(occupancy, magic, bits)] = attack;
            }
        }

        MagicTable { entries, attacks }
    }

    #[inline]
    fn attacks(&self, square: usize, occupancy: u64) -> u64 {
        let entry = &self.entries[square];
        self.attacks[entry.offset + magic_index(occupancy & entry.mask, entry.magic, entry.bits)]
    }

    pub(crate) fn magic(&self, square: usize) -> u64 {
        self.entries[square].magic
    }
}

pub(crate) static BISHOP_TABLE: Lazy<MagicTable> =
    Lazy::new(|| MagicTable::build(SliderKind::Bishop));
pub(crate) static ROOK_TABLE: Lazy<MagicTable> = Lazy::new(|| MagicTable::build(SliderKind::Rook));

#[inline]
pub(crate) fn bishop_attacks(square: usize, occupancy: u64) -> u64 {
    BISHOP_TABLE.attacks(square, occupancy)
}

#[inline]
pub(crate) fn rook_attacks(square: usize, occupancy: u64) -> u64 {
    ROOK_TABLE.attacks(square, occupancy)
}

#[rustfmt::skip]
const ROOK_MAGICS: [u64; 64] = [
    0x0380002a1281c000, 0x0200102302408200, 0x3480200289100080, 0x0480100208008004,
    0x0280080180040002, 0x0600100600040831, 0x0400300401084082, 0x1a00020040810024,
    0x0082002080420101, 0x0202002080410200, 0x0210801000200882, 0x2408801000080080,
    0x5090800800840080, 0x0222000488908200, 0x0004001002080104, 0x0c20800080005900,
    0x924380800820c011, 0x0040484010002000, 0x0020008020801000, 0x1020808010000804,
    0x0402850008009100, 0x8054008002008004, 0x400004005f100802, 0x00c65a0004164a81,
    0x0c00408200210200, 0x041002c240002000, 0x0020004100210010, 0x0600100080080082,
    0xc208008880040080, 0x0400020080040080, 0xe000420400614810, 0x0020008200104104,
    0x0800804000800038, 0x0290002008400048, 0x2080200282801000, 0x0c1600100a004120,
    0xc100800800800402, 0x04a0020080800400, 0x0208480184000210, 0x1801010082000044,
    0x1000400080008024, 0x100120100040c000, 0xa025002002450010, 0xc240080010008080,
    0x842b010801050010, 0x0080040002008080, 0x0040821001840008, 0x0000412040920004,
    0x0421400680002480, 0x0100400080200080, 0x0018801042002200, 0x0800480080100280,
    0x0685800402080080, 0x0089008400020900, 0x5044302802018400, 0x0200005084110200,
    0x0020310080012441, 0x0000204104120086, 0x00004010800a2202, 0x2002082010000501,
    0x0002006010440882, 0x8002004150381402, 0x050004a502181004, 0xc200002081004402,
];

#[rustfmt::skip]
const BISHOP_MAGICS: [u64; 64] = [
    0x0020202210404086, 0x0082480101020000, 0x00044902120000a0, 0x8008285302400064,
    0x8002021000008100, 0x040288200a000000, 0x0080440208400840, 0x1b02010042022000,
    0x4080c14808008080, 0x3200901031090021, 0x0080086808488000, 0x48150404218c2200,
    0x2000040504409000, 0x0040084110100900, 0x0002040101082042, 0x8e00202108088408,
    0x00040a0810041800, 0x0002a00802140408, 0x8088041008881013, 0x9000800802094032,
    0x544400ce01215008, 0x0804212200900800, 0x0041001401280200, 0x4100800100411090,
    0x000ea80c41886800, 0x000a1800b1010808, 0x0805100021040820, 0x4021080344004010,
    0x2102840008802000, 0x0810010040240101, 0x0084004000882408, 0x0000848401004840,
    0x2028201000044408, 0x000090484004a800, 0x4041040100a88800, 0x0010c20080180082,
    0x0021100400008020, 0x0002174501020088, 0x8085040404093300, 0xc048044840090500,
    0x1811010920204000, 0x02c2085b0c014820, 0x0000082488007000, 0x8004020122088400,
    0x00403a0202005412, 0x8c40080089010020, 0x020408009400a100, 0x0402008101029208,
    0x2004008404208000, 0x08008080a8208000, 0x0201004a08040804, 0xa12000020a020002,
    0x8004113102022104, 0x0262040408120200, 0x08d002b001120000, 0x2810042804822481,
    0x0030110410122814, 0x8082042684100800, 0x00c0201210840400, 0x681440000c208810,
    0x4400000120042400, 0x0022022060420224, 0x0100102008010050, 0x0002200200821081,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_skip_board_edges() {
        // a1 rook: a2..a7 and b1..g1
        assert_eq!(relevant_mask(0, SliderKind::Rook).count_ones(), 12);
        // d4 rook: 10 relevant squares
        assert_eq!(relevant_mask(27, SliderKind::Rook).count_ones(), 10);
        assert_eq!(relevant_mask(0, SliderKind::Bishop).count_ones(), 6);
        assert_eq!(relevant_mask(27, SliderKind::Bishop).count_ones(), 9);
        assert_eq!(relevant_mask(0, SliderKind::Rook) & 0xFF00_0000_0000_0080, 0);
    }

    #[test]
    fn occupancy_subsets_cover_the_mask() {
        let mask = relevant_mask(27, SliderKind::Bishop);
        assert_eq!(occupancy_from_index(0, mask), 0);
        assert_eq!(occupancy_from_index((1 << mask.count_ones()) - 1, mask), mask);
        assert_eq!(occupancy_from_index(1, mask), mask & mask.wrapping_neg());
    }

    #[test]
    fn fixed_magics_are_collision_free() {
        for square in 0..64 {
            assert!(verify_magic(square, SliderKind::Rook, ROOK_MAGICS[square]));
            assert!(verify_magic(square, SliderKind::Bishop, BISHOP_MAGICS[square]));
            assert_eq!(ROOK_TABLE.magic(square), ROOK_MAGICS[square]);
            assert_eq!(BISHOP_TABLE.magic(square), BISHOP_MAGICS[square]);
        }
    }

    #[test]
    fn table_lookups_match_ray_casting() {
        let occupancies = [
            0u64,
            0x0000_0010_0800_0000,
            0x00FF_0000_0000_FF00,
            0x8142_2418_1824_4281,
            0x1234_5678_9ABC_DEF0,
        ];
        for square in 0..64 {
            for &occ in &occupancies {
                assert_eq!(
                    rook_attacks(square, occ),
                    slow_attacks(square, occ, SliderKind::Rook)
                );
                assert_eq!(
                    bishop_attacks(square, occ),
                    slow_attacks(square, occ, SliderKind::Bishop)
                );
            }
        }
    }

    #[test]
    fn finder_produces_verified_magics() {
        let mut rng = StdRng::seed_from_u64(7);
        for square in [0u8, 27, 63] {
            let magic = find_magic(square, SliderKind::Bishop, &mut rng).unwrap();
            assert!(verify_magic(usize::from(square), SliderKind::Bishop, magic));
        }
        let magic = find_magic(27, SliderKind::Rook, &mut rng).unwrap();
        assert!(verify_magic(27, SliderKind::Rook, magic));
    }

    #[test]
    fn a_bad_magic_is_rejected() {
        assert!(!verify_magic(0, SliderKind::Rook, 1));
    }
}
