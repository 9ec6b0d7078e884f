// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed in-memory representation of calendar components.
//!
//! Component kinds form a closed set: calendar, event, alarm, timezone and
//! its observances. Each kind has one builder, selected by the block's
//! type token; unrecognized properties travel in an ordered extension bag
//! so they survive re-encoding.

pub mod alarm;
pub(crate) mod builder;
pub mod calendar;
pub mod event;
pub mod property;
pub mod timezone;

pub use self::alarm::Alarm;
pub use self::calendar::Calendar;
pub use self::event::{Event, EventEnd};
pub use self::property::{Attachment, Extensions, PropertyValue};
pub use self::timezone::{Observance, TimeZone};
