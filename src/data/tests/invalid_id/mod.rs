mod get_count;
mod increment;
mod reset;

use whiteout_test_utils::prelude::*;

use crate::data::invalid_id::InvalidIdTracker;
