// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::{node::ParameterTerm, Node, Type};

use crate::{
    expr::{lambda_parameter, parameter_expr},
    Expr, IntoExpr, IntoNode, Reactive,
};

pub const MAX_ARITY: usize = 15;

/// Parameter list of a resource or lambda, expressed as a tuple of reactive types
pub trait Parameters {
    const ARITY: usize;
    type Exprs;
    fn types() -> Vec<Type>;
    fn bind(depth: usize) -> (Vec<ParameterTerm>, Self::Exprs);
}

/// Argument tuple matching the parameter list `P` element for element
pub trait IntoArguments<P: Parameters> {
    fn into_nodes(self) -> Vec<Node>;
}

macro_rules! impl_parameters {
    ($arity:expr; $(($T:ident, $A:ident, $index:tt)),*) => {
        impl<$($T: Reactive),*> Parameters for ($($T,)*) {
            const ARITY: usize = $arity;
            type Exprs = ($(Expr<$T>,)*);
            fn types() -> Vec<Type> {
                vec![$($T::reactive_type()),*]
            }
            #[allow(unused_variables)]
            fn bind(depth: usize) -> (Vec<ParameterTerm>, Self::Exprs) {
                let parameters: Vec<ParameterTerm> =
                    vec![$(lambda_parameter($T::reactive_type(), depth, $index)),*];
                let exprs = ($(parameter_expr::<$T>(&parameters[$index]),)*);
                (parameters, exprs)
            }
        }
        impl<$($T: Reactive, $A: IntoExpr<$T>),*> IntoArguments<($($T,)*)> for ($($A,)*) {
            fn into_nodes(self) -> Vec<Node> {
                vec![$(self.$index.into_expr().into_node()),*]
            }
        }
    };
}

impl_parameters!(0;);
impl_parameters!(1; (T1, A1, 0));
impl_parameters!(2; (T1, A1, 0), (T2, A2, 1));
impl_parameters!(3; (T1, A1, 0), (T2, A2, 1), (T3, A3, 2));
impl_parameters!(4; (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3));
impl_parameters!(5; (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3), (T5, A5, 4));
impl_parameters!(
    6;
    (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3), (T5, A5, 4), (T6, A6, 5)
);
impl_parameters!(
    7;
    (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3), (T5, A5, 4), (T6, A6, 5),
    (T7, A7, 6)
);
impl_parameters!(
    8;
    (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3), (T5, A5, 4), (T6, A6, 5),
    (T7, A7, 6), (T8, A8, 7)
);
impl_parameters!(
    9;
    (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3), (T5, A5, 4), (T6, A6, 5),
    (T7, A7, 6), (T8, A8, 7), (T9, A9, 8)
);
impl_parameters!(
    10;
    (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3), (T5, A5, 4), (T6, A6, 5),
    (T7, A7, 6), (T8, A8, 7), (T9, A9, 8), (T10, A10, 9)
);
impl_parameters!(
    11;
    (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3), (T5, A5, 4), (T6, A6, 5),
    (T7, A7, 6), (T8, A8, 7), (T9, A9, 8), (T10, A10, 9), (T11, A11, 10)
);
impl_parameters!(
    12;
    (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3), (T5, A5, 4), (T6, A6, 5),
    (T7, A7, 6), (T8, A8, 7), (T9, A9, 8), (T10, A10, 9), (T11, A11, 10), (T12, A12, 11)
);
impl_parameters!(
    13;
    (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3), (T5, A5, 4), (T6, A6, 5),
    (T7, A7, 6), (T8, A8, 7), (T9, A9, 8), (T10, A10, 9), (T11, A11, 10), (T12, A12, 11),
    (T13, A13, 12)
);
impl_parameters!(
    14;
    (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3), (T5, A5, 4), (T6, A6, 5),
    (T7, A7, 6), (T8, A8, 7), (T9, A9, 8), (T10, A10, 9), (T11, A11, 10), (T12, A12, 11),
    (T13, A13, 12), (T14, A14, 13)
);
impl_parameters!(
    15;
    (T1, A1, 0), (T2, A2, 1), (T3, A3, 2), (T4, A4, 3), (T5, A5, 4), (T6, A6, 5),
    (T7, A7, 6), (T8, A8, 7), (T9, A9, 8), (T10, A10, 9), (T11, A11, 10), (T12, A12, 11),
    (T13, A13, 12), (T14, A14, 13), (T15, A15, 14)
);
