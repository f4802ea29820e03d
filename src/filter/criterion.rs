// The MIT License (MIT)
//
// Copyright (c) 2016 AT&T
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

/// A predicate over catalog entries. Closures taking `&T` are criteria too.
pub trait Criterion<T> {
    fn matches(&self, item: &T) -> bool;

    fn and<C>(self, other: C) -> And<Self, C>
        where Self: Sized,
              C: Criterion<T>
    {
        And(self, other)
    }

    fn or<C>(self, other: C) -> Or<Self, C>
        where Self: Sized,
              C: Criterion<T>
    {
        Or(self, other)
    }

    fn not(self) -> Not<Self>
        where Self: Sized
    {
        Not(self)
    }
}

impl<T, F> Criterion<T> for F
    where F: Fn(&T) -> bool
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

pub struct And<A, B>(A, B);

impl<T, A: Criterion<T>, B: Criterion<T>> Criterion<T> for And<A, B> {
    fn matches(&self, item: &T) -> bool {
        self.0.matches(item) && self.1.matches(item)
    }
}

pub struct Or<A, B>(A, B);

impl<T, A: Criterion<T>, B: Criterion<T>> Criterion<T> for Or<A, B> {
    fn matches(&self, item: &T) -> bool {
        self.0.matches(item) || self.1.matches(item)
    }
}

pub struct Not<A>(A);

impl<T, A: Criterion<T>> Criterion<T> for Not<A> {
    fn matches(&self, item: &T) -> bool {
        !self.0.matches(item)
    }
}

/// Matches when every contained criterion does. Empty matches everything.
pub struct AllOf<T> {
    criteria: Vec<Box<dyn Criterion<T> + Send + Sync>>,
}

impl<T> AllOf<T> {
    pub fn new() -> AllOf<T> {
        AllOf { criteria: vec![] }
    }

    pub fn push<C>(&mut self, criterion: C)
        where C: Criterion<T> + Send + Sync + 'static
    {
        self.criteria.push(Box::new(criterion));
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl<T> Criterion<T> for AllOf<T> {
    fn matches(&self, item: &T) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(item))
    }
}

/// Matches when any contained criterion does. Empty matches nothing.
pub struct AnyOf<T> {
    criteria: Vec<Box<dyn Criterion<T> + Send + Sync>>,
}

impl<T> AnyOf<T> {
    pub fn new() -> AnyOf<T> {
        AnyOf { criteria: vec![] }
    }

    pub fn push<C>(&mut self, criterion: C)
        where C: Criterion<T> + Send + Sync + 'static
    {
        self.criteria.push(Box::new(criterion));
    }
}

impl<T> Criterion<T> for AnyOf<T> {
    fn matches(&self, item: &T) -> bool {
        self.criteria.iter().any(|criterion| criterion.matches(item))
    }
}

pub fn filter<T, C>(items: &[T], criterion: &C) -> Vec<T>
    where T: Clone,
          C: Criterion<T> + ?Sized
{
    items.iter().filter(|item| criterion.matches(item)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even(n: &u32) -> bool {
        n % 2 == 0
    }

    #[test]
    fn combinators() {
        let numbers: Vec<u32> = (1..11).collect();
        let big = |n: &u32| *n > 6;

        assert_eq!(filter(&numbers, &even.and(big)), vec![8, 10]);
        assert_eq!(filter(&numbers, &even.not().and(|n: &u32| *n < 4)), vec![1, 3]);
        assert_eq!(filter(&numbers, &(|n: &u32| *n == 1).or(|n: &u32| *n == 10)), vec![1, 10]);
    }

    #[test]
    fn collections() {
        let numbers: Vec<u32> = (1..11).collect();

        let mut all: AllOf<u32> = AllOf::new();
        assert_eq!(filter(&numbers, &all).len(), 10);
        all.push(even);
        all.push(|n: &u32| *n % 3 == 0);
        assert_eq!(filter(&numbers, &all), vec![6]);

        let mut any: AnyOf<u32> = AnyOf::new();
        assert!(filter(&numbers, &any).is_empty());
        any.push(|n: &u32| *n == 2);
        any.push(|n: &u32| *n == 7);
        assert_eq!(filter(&numbers, &any), vec![2, 7]);
    }
}
