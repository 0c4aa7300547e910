
use whiteout_test_utils::prelude::*;

use crate::data::member::MemberRepository;
