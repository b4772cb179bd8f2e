//! Static feature-code table.

use super::{FeatureClass, FeatureCode};

macro_rules! codes {
    ($class:ident: $($code:literal => $label:literal),* $(,)?) => {
        [$(FeatureCode { code: $code, class: FeatureClass::$class, label: $label }),*]
    };
}

pub(super) static ADMINISTRATIVE: [FeatureCode; 24] = codes!(A:
    "ADM1" => "first-order administrative division",
    "ADM1H" => "historical first-order administrative division",
    "ADM2" => "second-order administrative division",
    "ADM2H" => "historical second-order administrative division",
    "ADM3" => "third-order administrative division",
    "ADM3H" => "historical third-order administrative division",
    "ADM4" => "fourth-order administrative division",
    "ADM4H" => "historical fourth-order administrative division",
    "ADM5" => "fifth-order administrative division",
    "ADM5H" => "historical fifth-order administrative division",
    "ADMD" => "administrative division",
    "ADMDH" => "historical administrative division",
    "LTER" => "leased area",
    "PCL" => "political entity",
    "PCLD" => "dependent political entity",
    "PCLF" => "freely associated state",
    "PCLH" => "historical political entity",
    "PCLI" => "independent political entity",
    "PCLIX" => "section of independent political entity",
    "PCLS" => "semi-independent political entity",
    "PRSH" => "parish",
    "TERR" => "territory",
    "ZN" => "zone",
    "ZNB" => "buffer zone",
);

pub(super) static HYDROGRAPHIC: [FeatureCode; 54] = codes!(H:
    "ANCH" => "anchorage",
    "BAY" => "bay",
    "BAYS" => "bays",
    "BGHT" => "bight",
    "BNK" => "bank",
    "BOG" => "bog",
    "CHN" => "channel",
    "CNFL" => "confluence",
    "CNL" => "canal",
    "CNLD" => "drainage canal",
    "CNLI" => "irrigation canal",
    "CNLN" => "navigation canal",
    "COVE" => "cove",
    "CRKT" => "tidal creek",
    "DCK" => "dock",
    "DTCH" => "ditch",
    "ESTY" => "estuary",
    "FJD" => "fjord",
    "FLLS" => "waterfall",
    "FLTT" => "tidal flat",
    "GLCR" => "glacier",
    "GULF" => "gulf",
    "GYSR" => "geyser",
    "HBR" => "harbor",
    "INLT" => "inlet",
    "LGN" => "lagoon",
    "LK" => "lake",
    "LKC" => "crater lake",
    "LKI" => "intermittent lake",
    "LKN" => "salt lake",
    "LKS" => "lakes",
    "MRSH" => "marsh",
    "NRWS" => "narrows",
    "OCN" => "ocean",
    "PND" => "pond",
    "PNDS" => "ponds",
    "POOL" => "pool",
    "RF" => "reef",
    "RPDS" => "rapids",
    "RSV" => "reservoir",
    "SD" => "sound",
    "SEA" => "sea",
    "SPNG" => "spring",
    "SPNT" => "hot spring",
    "STM" => "stream",
    "STMI" => "intermittent stream",
    "STMM" => "stream mouth",
    "STMS" => "streams",
    "STRT" => "strait",
    "SWMP" => "swamp",
    "WAD" => "wadi",
    "WLL" => "well",
    "WTLD" => "wetland",
    "WTRC" => "watercourse",
);

pub(super) static AREA: [FeatureCode; 33] = codes!(L:
    "AGRC" => "agricultural colony",
    "AMUS" => "amusement park",
    "AREA" => "area",
    "BSND" => "drainage basin",
    "BTL" => "battlefield",
    "CLG" => "clearing",
    "CMN" => "common",
    "CONT" => "continent",
    "CST" => "coast",
    "CTRB" => "business center",
    "DEVH" => "housing development",
    "FLD" => "field",
    "GASF" => "gasfield",
    "GRAZ" => "grazing area",
    "INDS" => "industrial area",
    "LCTY" => "locality",
    "MILB" => "military base",
    "MNA" => "mining area",
    "NVB" => "naval base",
    "OAS" => "oasis",
    "OILF" => "oilfield",
    "PRK" => "park",
    "PRT" => "port",
    "RES" => "reserve",
    "RESF" => "forest reserve",
    "RESN" => "nature reserve",
    "RESV" => "reservation",
    "RESW" => "wildlife reserve",
    "RGN" => "region",
    "RGNE" => "economic region",
    "RGNH" => "historical region",
    "SNOW" => "snowfield",
    "TRB" => "tribal area",
);

pub(super) static POPULATED: [FeatureCode; 18] = codes!(P:
    "PPL" => "populated place",
    "PPLA" => "seat of a first-order administrative division",
    "PPLA2" => "seat of a second-order administrative division",
    "PPLA3" => "seat of a third-order administrative division",
    "PPLA4" => "seat of a fourth-order administrative division",
    "PPLA5" => "seat of a fifth-order administrative division",
    "PPLC" => "capital of a political entity",
    "PPLCH" => "historical capital of a political entity",
    "PPLF" => "farm village",
    "PPLG" => "seat of government of a political entity",
    "PPLH" => "historical populated place",
    "PPLL" => "populated locality",
    "PPLQ" => "abandoned populated place",
    "PPLR" => "religious populated place",
    "PPLS" => "populated places",
    "PPLW" => "destroyed populated place",
    "PPLX" => "section of populated place",
    "STLMT" => "israeli settlement",
);

pub(super) static ROAD: [FeatureCode; 20] = codes!(R:
    "CSWY" => "causeway",
    "OILP" => "oil pipeline",
    "PRMN" => "promenade",
    "PTGE" => "portage",
    "RD" => "road",
    "RDA" => "ancient road",
    "RDB" => "road bend",
    "RDCUT" => "road cut",
    "RDJCT" => "road junction",
    "RJCT" => "railroad junction",
    "RR" => "railroad",
    "RRQ" => "abandoned railroad",
    "RTE" => "caravan route",
    "RYD" => "railroad yard",
    "ST" => "street",
    "STKR" => "stock route",
    "TNL" => "tunnel",
    "TNLRD" => "road tunnel",
    "TNLRR" => "railroad tunnel",
    "TRL" => "trail",
);

pub(super) static SPOT: [FeatureCode; 52] = codes!(S:
    "ADMF" => "administrative facility",
    "AIRB" => "airbase",
    "AIRF" => "airfield",
    "AIRH" => "heliport",
    "AIRP" => "airport",
    "AMTH" => "amphitheater",
    "ANS" => "archaeological site",
    "BANK" => "bank",
    "BDG" => "bridge",
    "BLDG" => "building",
    "BUSTN" => "bus station",
    "BUSTP" => "bus stop",
    "CAVE" => "cave",
    "CH" => "church",
    "CMP" => "camp",
    "CMTY" => "cemetery",
    "CSTL" => "castle",
    "CTHSE" => "courthouse",
    "DAM" => "dam",
    "FRM" => "farm",
    "FT" => "fort",
    "GDN" => "garden",
    "HSP" => "hospital",
    "HSTS" => "historical site",
    "HTL" => "hotel",
    "LIBR" => "library",
    "LTHSE" => "lighthouse",
    "MALL" => "mall",
    "MKT" => "market",
    "MNMT" => "monument",
    "MSQE" => "mosque",
    "MSTY" => "monastery",
    "MTRO" => "metro station",
    "MUS" => "museum",
    "OBS" => "observatory",
    "PAL" => "palace",
    "PO" => "post office",
    "PRN" => "prison",
    "PS" => "power station",
    "PYR" => "pyramid",
    "RECG" => "golf course",
    "RSRT" => "resort",
    "RSTN" => "railroad station",
    "SCH" => "school",
    "SHRN" => "shrine",
    "SQR" => "square",
    "STDM" => "stadium",
    "SYG" => "synagogue",
    "TMPL" => "temple",
    "TOWR" => "tower",
    "UNIV" => "university",
    "ZOO" => "zoo",
);

pub(super) static HYPSOGRAPHIC: [FeatureCode; 22] = codes!(T:
    "BCH" => "beach",
    "CAPE" => "cape",
    "CLF" => "cliff",
    "CRTR" => "crater",
    "DSRT" => "desert",
    "DUNE" => "dune",
    "GRGE" => "gorge",
    "HLL" => "hill",
    "HLLS" => "hills",
    "ISL" => "island",
    "ISLS" => "islands",
    "MT" => "mountain",
    "MTS" => "mountains",
    "PASS" => "pass",
    "PEN" => "peninsula",
    "PK" => "peak",
    "PKS" => "peaks",
    "PLAT" => "plateau",
    "PLN" => "plain",
    "RDGE" => "ridge",
    "VAL" => "valley",
    "VLC" => "volcano",
);

pub(super) static UNDERSEA: [FeatureCode; 12] = codes!(U:
    "BNKU" => "bank",
    "CNYU" => "canyon",
    "DPTU" => "deep",
    "FRKU" => "fracture zone",
    "GAPU" => "gap",
    "HLLU" => "hill",
    "PLNU" => "plain",
    "RDGU" => "ridge",
    "RFU" => "reef",
    "SMU" => "seamount",
    "TRNU" => "trench",
    "VALU" => "valley",
);

pub(super) static VEGETATION: [FeatureCode; 15] = codes!(V:
    "BUSH" => "bush",
    "CULT" => "cultivated area",
    "FRST" => "forest",
    "FRSTF" => "fossilized forest",
    "GRSLD" => "grassland",
    "GRVC" => "coconut grove",
    "GRVO" => "olive grove",
    "GRVP" => "palm grove",
    "HTH" => "heath",
    "MDW" => "meadow",
    "OCH" => "orchard",
    "SCRB" => "scrubland",
    "TREE" => "tree",
    "TUND" => "tundra",
    "VIN" => "vineyard",
);

/// Every class table, in class order
pub(super) static ALL: [&[FeatureCode]; 9] = [
    &ADMINISTRATIVE,
    &HYDROGRAPHIC,
    &AREA,
    &POPULATED,
    &ROAD,
    &SPOT,
    &HYPSOGRAPHIC,
    &UNDERSEA,
    &VEGETATION,
];
