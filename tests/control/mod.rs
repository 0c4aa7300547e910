mod check_all;

use whiteout_control::{
    error::{ControlError, Error},
    service::control::ControlService,
};
use whiteout_test_utils::prelude::*;

use crate::util::setup::{ControlHarness, CHANNEL_ID};
