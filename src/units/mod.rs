/*
 * Copyright (c) 2003-2023. Trevor Campbell and others.
 *
 * This file is part of Kelpie Flight Route.
 *
 * Kelpie Flight Route is free software; you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation; either version 2 of the License, or
 * (at your option) any later version.
 *
 * Kelpie Flight Route is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Kelpie Flight Route; if not, write to the Free Software
 * Foundation, Inc., 59 Temple Place, Suite 330, Boston, MA  02111-1307  USA
 *
 * Contributors:
 *      Trevor Campbell
 *
 */

//! Physical quantities used by the route computations.
//!
//! Every quantity stores its magnitude in one canonical SI unit and offers
//! named constructors and accessors for the aviation units we deal with.
//! A NaN magnitude means "unknown". It is the `Default` and it propagates
//! through all arithmetic, so a missing input simply turns into an unknown
//! output instead of an error.

pub(crate) const METERS_PER_NM: f64 = 1852.0;
pub(crate) const METERS_PER_FOOT: f64 = 0.3048;
pub(crate) const SECONDS_PER_HOUR: f64 = 3600.0;

// Shared plumbing for the quantity newtypes. Each type wraps a single f64.
macro_rules! quantity {
    ($name:ident) => {
        impl $name {
            /// True unless the magnitude is NaN or infinite.
            pub fn is_finite(&self) -> bool {
                self.0.is_finite()
            }

            pub fn is_negative(&self) -> bool {
                self.0 < 0.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self(f64::NAN)
            }
        }

        impl ::std::ops::Add for $name {
            type Output = $name;

            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl ::std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl ::std::ops::Sub for $name {
            type Output = $name;

            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl ::std::ops::Neg for $name {
            type Output = $name;

            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl ::std::ops::Mul<f64> for $name {
            type Output = $name;

            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl ::std::ops::Mul<$name> for f64 {
            type Output = $name;

            fn mul(self, rhs: $name) -> Self::Output {
                $name(self * rhs.0)
            }
        }
    };
}

mod angle;
mod distance;
mod speed;
mod time;

pub use angle::Angle;
pub use distance::Distance;
pub use speed::Speed;
pub use time::Time;
