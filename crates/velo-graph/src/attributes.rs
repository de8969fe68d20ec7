//! OSM tag categories attached to graph edges.
//!
//! Every edge references one entry of a deduplicated table of
//! [`AttributeSet`]s.  A set is a 64-bit mask over the [`Attribute`]
//! enumeration: bit `b` is set when the attribute with ordinal `b` applies.

use std::fmt;

use crate::{GraphError, GraphResult};

macro_rules! attributes {
    ($($name:ident => ($key:literal, $value:literal)),+ $(,)?) => {
        /// A single `key=value` OSM tag category.  The declaration order is
        /// the bit order used in the graph files and must never change.
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum Attribute {
            $($name),+
        }

        impl Attribute {
            /// Every attribute, in ordinal order.
            pub const ALL: &'static [Attribute] = &[$(Attribute::$name),+];

            pub const COUNT: usize = Self::ALL.len();

            pub fn key(self) -> &'static str {
                match self {
                    $(Attribute::$name => $key),+
                }
            }

            pub fn value(self) -> &'static str {
                match self {
                    $(Attribute::$name => $value),+
                }
            }
        }
    };
}

attributes! {
    HighwayService       => ("highway", "service"),
    HighwayTrack         => ("highway", "track"),
    HighwayResidential   => ("highway", "residential"),
    HighwayFootway       => ("highway", "footway"),
    HighwayPath          => ("highway", "path"),
    HighwayUnclassified  => ("highway", "unclassified"),
    HighwayTertiary      => ("highway", "tertiary"),
    HighwaySecondary     => ("highway", "secondary"),
    HighwayPrimary       => ("highway", "primary"),
    HighwayCycleway      => ("highway", "cycleway"),
    HighwaySteps         => ("highway", "steps"),
    HighwayTrunk         => ("highway", "trunk"),
    HighwayPedestrian    => ("highway", "pedestrian"),
    HighwayLivingStreet  => ("highway", "living_street"),
    HighwayMotorway      => ("highway", "motorway"),
    HighwayTertiaryLink  => ("highway", "tertiary_link"),
    HighwaySecondaryLink => ("highway", "secondary_link"),
    HighwayPrimaryLink   => ("highway", "primary_link"),
    HighwayTrunkLink     => ("highway", "trunk_link"),
    HighwayMotorwayLink  => ("highway", "motorway_link"),

    TracktypeGrade1      => ("tracktype", "grade1"),
    TracktypeGrade2      => ("tracktype", "grade2"),
    TracktypeGrade3      => ("tracktype", "grade3"),
    TracktypeGrade4      => ("tracktype", "grade4"),
    TracktypeGrade5      => ("tracktype", "grade5"),

    SurfaceAsphalt       => ("surface", "asphalt"),
    SurfaceUnpaved       => ("surface", "unpaved"),
    SurfaceGravel        => ("surface", "gravel"),
    SurfacePaved         => ("surface", "paved"),
    SurfaceGround        => ("surface", "ground"),
    SurfaceConcrete      => ("surface", "concrete"),
    SurfacePavingStones  => ("surface", "paving_stones"),
    SurfaceDirt          => ("surface", "dirt"),
    SurfaceFineGravel    => ("surface", "fine_gravel"),
    SurfaceCompacted     => ("surface", "compacted"),
    SurfaceSett          => ("surface", "sett"),
    SurfaceGrass         => ("surface", "grass"),
    SurfaceSand          => ("surface", "sand"),
    SurfaceCobblestone   => ("surface", "cobblestone"),

    VehiclePrivate       => ("vehicle", "private"),
    VehicleNo            => ("vehicle", "no"),

    AccessYes            => ("access", "yes"),
    AccessNo             => ("access", "no"),
    AccessPrivate        => ("access", "private"),
    AccessPermissive     => ("access", "permissive"),

    MotorroadYes         => ("motorroad", "yes"),

    OnewayYes            => ("oneway", "yes"),
    OnewayM1             => ("oneway", "-1"),
    OnewayBicycleYes     => ("oneway:bicycle", "yes"),
    OnewayBicycleNo      => ("oneway:bicycle", "no"),

    BicycleYes           => ("bicycle", "yes"),
    BicycleNo            => ("bicycle", "no"),
    BicycleDesignated    => ("bicycle", "designated"),
    BicycleDismount      => ("bicycle", "dismount"),
    BicycleUseSidepath   => ("bicycle", "use_sidepath"),
    BicyclePermissive    => ("bicycle", "permissive"),
    BicyclePrivate       => ("bicycle", "private"),

    CyclewayOpposite     => ("cycleway", "opposite"),
    CyclewayOppositeLane => ("cycleway", "opposite_lane"),
    CyclewayOppositeTrack => ("cycleway", "opposite_track"),

    LcnYes               => ("lcn", "yes"),
    RcnYes               => ("rcn", "yes"),
    NcnYes               => ("ncn", "yes"),
}

const _: () = assert!(Attribute::COUNT <= 64);

impl Attribute {
    #[inline]
    fn mask(self) -> u64 {
        1u64 << (self as u8)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key(), self.value())
    }
}

/// A set of [`Attribute`]s stored as a bit mask.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeSet(u64);

impl AttributeSet {
    pub const EMPTY: AttributeSet = AttributeSet(0);

    /// Wrap a raw mask.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidAttributeBits`] if a bit at or beyond
    /// [`Attribute::COUNT`] is set.
    pub fn new(bits: u64) -> GraphResult<Self> {
        if Attribute::COUNT < 64 && bits >> Attribute::COUNT != 0 {
            return Err(GraphError::InvalidAttributeBits(bits));
        }
        Ok(AttributeSet(bits))
    }

    pub const fn of(attributes: &[Attribute]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < attributes.len() {
            bits |= 1u64 << attributes[i] as u8;
            i += 1;
        }
        AttributeSet(bits)
    }

    #[inline]
    pub fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn contains(self, attribute: Attribute) -> bool {
        self.0 & attribute.mask() != 0
    }

    /// `true` if the two sets share at least one attribute.
    #[inline]
    pub fn intersects(self, that: AttributeSet) -> bool {
        self.0 & that.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Attributes in the set, in ordinal order.
    pub fn iter(self) -> impl Iterator<Item = Attribute> {
        Attribute::ALL.iter().copied().filter(move |a| self.contains(*a))
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, attribute) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{attribute}")?;
        }
        f.write_str("}")
    }
}
