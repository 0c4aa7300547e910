/// Highest furnace level displayed as a plain number.
const BASE_LEVEL: i32 = 30;
/// Level of the first fire crystal tier, `FC 1`.
const FIRST_FC_LEVEL: i32 = 35;
const LAST_FC_TIER: i32 = 10;
/// Levels per fire crystal tier, the tier itself plus four sub-steps.
const LEVELS_PER_TIER: i32 = 5;

/// Human-readable label for a raw furnace level.
///
/// Levels 31-34 render as `30-1`..`30-4`, 35 as `FC 1`, 36-39 as `FC 1 - 1`..`FC 1 - 4` and so
/// on up to `FC 10 - 4` (84). Anything else renders as the plain number.
pub fn furnace_level_label(level: i32) -> String {
    if level <= BASE_LEVEL {
        return level.to_string();
    }

    if level < FIRST_FC_LEVEL {
        return format!("{}-{}", BASE_LEVEL, level - BASE_LEVEL);
    }

    let offset = level - FIRST_FC_LEVEL;
    let tier = offset / LEVELS_PER_TIER + 1;
    let step = offset % LEVELS_PER_TIER;

    if tier > LAST_FC_TIER {
        return level.to_string();
    }

    if step == 0 {
        format!("FC {}", tier)
    } else {
        format!("FC {} - {}", tier, step)
    }
}
