
use whiteout_test_utils::prelude::*;

use crate::data::change_log::ChangeLogRepository;
