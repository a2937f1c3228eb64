// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::Uri;

use crate::ReactiveError;

pub trait IntoUri {
    fn into_uri(self) -> Result<Uri, ReactiveError>;
}
impl IntoUri for Uri {
    fn into_uri(self) -> Result<Uri, ReactiveError> {
        Ok(self)
    }
}
impl<'a> IntoUri for &'a Uri {
    fn into_uri(self) -> Result<Uri, ReactiveError> {
        Ok(self.clone())
    }
}
impl<'a> IntoUri for &'a str {
    fn into_uri(self) -> Result<Uri, ReactiveError> {
        Ok(Uri::parse(self)?)
    }
}
impl IntoUri for String {
    fn into_uri(self) -> Result<Uri, ReactiveError> {
        Ok(Uri::parse(&self)?)
    }
}
impl<'a> IntoUri for &'a String {
    fn into_uri(self) -> Result<Uri, ReactiveError> {
        Ok(Uri::parse(self)?)
    }
}
impl<T: IntoUri> IntoUri for Option<T> {
    fn into_uri(self) -> Result<Uri, ReactiveError> {
        match self {
            Some(value) => value.into_uri(),
            None => Err(ReactiveError::missing_argument("uri")),
        }
    }
}

/// Artifact argument which may be absent at the call site
pub trait Required<T> {
    fn required(self, argument: &'static str) -> Result<T, ReactiveError>;
}
impl<T> Required<T> for T {
    fn required(self, _argument: &'static str) -> Result<T, ReactiveError> {
        Ok(self)
    }
}
impl<'a, T: Clone> Required<T> for &'a T {
    fn required(self, _argument: &'static str) -> Result<T, ReactiveError> {
        Ok(self.clone())
    }
}
impl<T> Required<T> for Option<T> {
    fn required(self, argument: &'static str) -> Result<T, ReactiveError> {
        self.ok_or_else(|| ReactiveError::missing_argument(argument))
    }
}
