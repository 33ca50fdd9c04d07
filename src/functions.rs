//! # Function Catalogue
//!
//! Ready-made function symbols for building a [`SymbolTable`](crate::gene::SymbolTable).
//! The evolution engine never depends on which functions a problem uses; these
//! are conveniences grouped the usual way.
//!
//! All functions use plain `f64` arithmetic: division by zero yields an infinity
//! or NaN, which the fitness boundary turns into a penalised individual.

use crate::gene::Function;

pub fn add() -> Function {
    Function::new("+", 2, |a| a[0] + a[1])
}

pub fn subtract() -> Function {
    Function::new("-", 2, |a| a[0] - a[1])
}

pub fn multiply() -> Function {
    Function::new("*", 2, |a| a[0] * a[1])
}

pub fn divide() -> Function {
    Function::new("/", 2, |a| a[0] / a[1])
}

pub fn modulus() -> Function {
    Function::new("%", 2, |a| a[0] % a[1])
}

pub fn pow() -> Function {
    Function::new("pow", 2, |a| a[0].powf(a[1]))
}

pub fn sqrt() -> Function {
    Function::new("sqrt", 1, |a| a[0].sqrt())
}

pub fn square() -> Function {
    Function::new("square", 1, |a| a[0] * a[0])
}

pub fn exp() -> Function {
    Function::new("exp", 1, |a| a[0].exp())
}

pub fn ln() -> Function {
    Function::new("ln", 1, |a| a[0].ln())
}

pub fn sin() -> Function {
    Function::new("sin", 1, |a| a[0].sin())
}

pub fn cos() -> Function {
    Function::new("cos", 1, |a| a[0].cos())
}

pub fn tan() -> Function {
    Function::new("tan", 1, |a| a[0].tan())
}

pub fn sinh() -> Function {
    Function::new("sinh", 1, |a| a[0].sinh())
}

pub fn cosh() -> Function {
    Function::new("cosh", 1, |a| a[0].cosh())
}

pub fn tanh() -> Function {
    Function::new("tanh", 1, |a| a[0].tanh())
}

pub fn max() -> Function {
    Function::new("max", 2, |a| a[0].max(a[1]))
}

pub fn min() -> Function {
    Function::new("min", 2, |a| a[0].min(a[1]))
}

pub fn abs() -> Function {
    Function::new("abs", 1, |a| a[0].abs())
}

pub fn floor() -> Function {
    Function::new("floor", 1, |a| a[0].floor())
}

pub fn ceil() -> Function {
    Function::new("ceil", 1, |a| a[0].ceil())
}

pub fn round() -> Function {
    Function::new("round", 1, |a| a[0].round())
}

/// `+ - * / %`
pub fn arithmetic() -> Vec<Function> {
    vec![add(), subtract(), multiply(), divide(), modulus()]
}

/// `pow sqrt square exp ln`
pub fn power() -> Vec<Function> {
    vec![pow(), sqrt(), square(), exp(), ln()]
}

/// `sin cos tan`
pub fn trigonometry() -> Vec<Function> {
    vec![sin(), cos(), tan()]
}

/// `sinh cosh tanh`
pub fn hyperbolic() -> Vec<Function> {
    vec![sinh(), cosh(), tanh()]
}

/// `max min`
pub fn comparison() -> Vec<Function> {
    vec![max(), min()]
}

/// `abs floor ceil round`
pub fn rounding() -> Vec<Function> {
    vec![abs(), floor(), ceil(), round()]
}

/// Every function of the catalogue.
pub fn all() -> Vec<Function> {
    [
        arithmetic(),
        power(),
        trigonometry(),
        hyperbolic(),
        comparison(),
        rounding(),
    ]
    .concat()
}
