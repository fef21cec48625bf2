//! Typed ids.
//!
//! `AgentId` is the world's handle for a creature; the decision core stores
//! it but never interprets it.  The rest index arenas owned by one engine
//! (tree templates and their nodes, utility actions, planner goals and
//! steps), which is why they are narrow: a `u16` id caps a registry at
//! 65 536 entries and registration past that fails with a capacity error.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Position in the owning arena.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        /// Fails once an arena outgrows the id's integer width.
        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Opaque handle of a simulated creature.  Owned by the world; the
    /// decision core only ever borrows it.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a node inside one behavior-tree template arena.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a compiled behavior-tree template.
    pub struct TemplateId(u16);
}

typed_id! {
    /// Index of a utility action in the scorer's registry.
    pub struct ActionId(u16);
}

typed_id! {
    /// Index of a goal in the planner's goal registry.
    pub struct GoalId(u16);
}

typed_id! {
    /// Index of a plan step in the planner's step registry.
    pub struct StepId(u16);
}
