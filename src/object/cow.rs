use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// View an object mutably.
///
/// A view shares the same storage handle as its source, so writes made
/// through either one are visible to both.
pub trait ViewMut {
    fn view_mut(&self) -> Self;
}

/// Whether a container's storage may be written in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Ownership {
    /// Sole holder; mutation may happen in place
    #[default]
    Exclusive,
    /// Storage is observed elsewhere; mutation must copy first
    Shared,
}

/// Internal Data representation for copy-on-write semantics.
///
/// The outer `Rc` is the storage handle (cloned by [`ViewMut::view_mut`]),
/// the inner `Rc` is the data itself (cloned lazily by [`Clone::clone`] and
/// materialized on the first write).
#[derive(Debug, PartialEq, Default)]
pub struct CowObj<T: Clone>(Rc<RefCell<Rc<T>>>);

impl<T: Clone> Clone for CowObj<T> {
    fn clone(&self) -> Self {
        Self::new(Rc::new(RefCell::new(self.0.borrow().clone())))
    }
}

impl<T: Clone> From<T> for CowObj<T> {
    fn from(x: T) -> Self {
        CowObj::new(Rc::new(RefCell::new(Rc::new(x))))
    }
}

impl<T: Clone> CowObj<T> {
    pub fn new(x: Rc<RefCell<Rc<T>>>) -> Self {
        CowObj(x)
    }

    /// Get mutable access to the internal data.
    /// In case a lazy copy still points at the same data, the data is
    /// cloned before it is handed out.
    pub fn with_inner_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let CowObj(x) = self;
        let x1 = &mut *x.borrow_mut();
        let vals = Rc::make_mut(x1);
        f(vals)
    }

    /// Borrow the internal data immutably.
    pub fn borrow(&self) -> Ref<'_, Rc<T>> {
        self.0.borrow()
    }

    /// Detach from any other holder by copying the data into fresh storage.
    pub fn materialize(&self) -> Self {
        let data: T = (**self.borrow()).clone();
        CowObj::from(data)
    }

    /// Infer ownership from reference counts. Both views (sharing the
    /// handle) and lazy copies (sharing the data) count as observers.
    pub fn ownership(&self) -> Ownership {
        if Rc::strong_count(&self.0) > 1 || Rc::strong_count(&self.0.borrow()) > 1 {
            Ownership::Shared
        } else {
            Ownership::Exclusive
        }
    }

    /// Whether both objects currently read from the same data
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || Rc::ptr_eq(&self.borrow(), &other.borrow())
    }
}

impl<T: Clone> ViewMut for CowObj<T> {
    fn view_mut(&self) -> Self {
        Self::new(Rc::clone(&self.0))
    }
}

impl<T: Clone> CowObj<Vec<T>> {
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
