//! Fixed option catalogs — the vocabulary behind every closed enumeration and
//! multi-select field of a project record.
//!
//! Catalogs are append-only: saved records reference option codes, so a code
//! that is renamed or removed stops resolving for every record that used it.
//! Choice order is display order, both in the form and in the notice.

use crate::error::RecordError;
use std::fmt;
use std::str::FromStr;

/// A selectable option: stable code plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub code: &'static str,
    pub label: &'static str,
}

const fn choice(code: &'static str, label: &'static str) -> Choice {
    Choice { code, label }
}

/// An ordered, immutable list of choices for one category.
#[derive(Debug)]
pub struct Catalog {
    pub id: CatalogId,
    pub title: &'static str,
    pub choices: &'static [Choice],
}

impl Catalog {
    pub fn get(&self, code: &str) -> Option<&'static Choice> {
        self.choices.iter().find(|c| c.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Index of `code` in display order.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.choices.iter().position(|c| c.code == code)
    }

    /// Label for `code`, or the raw code when the catalog does not define it.
    pub fn resolve<'a>(&self, code: &'a str) -> &'a str {
        match self.get(code) {
            Some(choice) => choice.label,
            None => code,
        }
    }

    pub fn codes(&self) -> impl Iterator<Item = &'static str> {
        self.choices.iter().map(|c| c.code)
    }
}

/// Look up the label of `code` in the catalog named by `id`.
///
/// Total: unknown codes come back verbatim so a legacy record still renders.
pub fn label_of(id: CatalogId, code: &str) -> &str {
    id.catalog().resolve(code)
}

/// Every catalog the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogId {
    RiskLevel,
    AlarmSystemType,
    AlarmSystemCategory,
    EstablishmentType,
    EstablishmentCategory,
    Evacuation,
    Suppression,
    Detection,
    Compartmentation,
    SmokeExtraction,
    Reception,
    HorizontalCirculation,
    VerticalCirculation,
    Sanitary,
    Parking,
    Signage,
    Comfort,
}

impl CatalogId {
    pub const ALL: [CatalogId; 17] = [
        CatalogId::RiskLevel,
        CatalogId::AlarmSystemType,
        CatalogId::AlarmSystemCategory,
        CatalogId::EstablishmentType,
        CatalogId::EstablishmentCategory,
        CatalogId::Evacuation,
        CatalogId::Suppression,
        CatalogId::Detection,
        CatalogId::Compartmentation,
        CatalogId::SmokeExtraction,
        CatalogId::Reception,
        CatalogId::HorizontalCirculation,
        CatalogId::VerticalCirculation,
        CatalogId::Sanitary,
        CatalogId::Parking,
        CatalogId::Signage,
        CatalogId::Comfort,
    ];

    /// Stable kebab-case key, used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            CatalogId::RiskLevel => "risk-level",
            CatalogId::AlarmSystemType => "alarm-system-type",
            CatalogId::AlarmSystemCategory => "alarm-system-category",
            CatalogId::EstablishmentType => "establishment-type",
            CatalogId::EstablishmentCategory => "establishment-category",
            CatalogId::Evacuation => "evacuation",
            CatalogId::Suppression => "suppression",
            CatalogId::Detection => "detection",
            CatalogId::Compartmentation => "compartmentation",
            CatalogId::SmokeExtraction => "smoke-extraction",
            CatalogId::Reception => "reception",
            CatalogId::HorizontalCirculation => "horizontal-circulation",
            CatalogId::VerticalCirculation => "vertical-circulation",
            CatalogId::Sanitary => "sanitary",
            CatalogId::Parking => "parking",
            CatalogId::Signage => "signage",
            CatalogId::Comfort => "comfort",
        }
    }

    pub fn catalog(self) -> &'static Catalog {
        match self {
            CatalogId::RiskLevel => &RISK_LEVEL,
            CatalogId::AlarmSystemType => &ALARM_SYSTEM_TYPE,
            CatalogId::AlarmSystemCategory => &ALARM_SYSTEM_CATEGORY,
            CatalogId::EstablishmentType => &ESTABLISHMENT_TYPE,
            CatalogId::EstablishmentCategory => &ESTABLISHMENT_CATEGORY,
            CatalogId::Evacuation => &EVACUATION,
            CatalogId::Suppression => &SUPPRESSION,
            CatalogId::Detection => &DETECTION,
            CatalogId::Compartmentation => &COMPARTMENTATION,
            CatalogId::SmokeExtraction => &SMOKE_EXTRACTION,
            CatalogId::Reception => &RECEPTION,
            CatalogId::HorizontalCirculation => &HORIZONTAL_CIRCULATION,
            CatalogId::VerticalCirculation => &VERTICAL_CIRCULATION,
            CatalogId::Sanitary => &SANITARY,
            CatalogId::Parking => &PARKING,
            CatalogId::Signage => &SIGNAGE,
            CatalogId::Comfort => &COMFORT,
        }
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CatalogId {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| RecordError::UnknownCatalog(s.to_string()))
    }
}

// -- Closed enumerations ------------------------------------------------------

static RISK_LEVEL: Catalog = Catalog {
    id: CatalogId::RiskLevel,
    title: "Niveau de risque",
    choices: &[
        choice("faible", "Faible"),
        choice("modere", "Modéré"),
        choice("eleve", "Élevé"),
    ],
};

static ALARM_SYSTEM_TYPE: Catalog = Catalog {
    id: CatalogId::AlarmSystemType,
    title: "Type de SSI",
    choices: &[
        choice("", "À préciser"),
        choice("A", "Type A"),
        choice("B", "Type B"),
        choice("C", "Type C"),
        choice("D", "Type D"),
        choice("E", "Type E"),
    ],
};

static ALARM_SYSTEM_CATEGORY: Catalog = Catalog {
    id: CatalogId::AlarmSystemCategory,
    title: "Catégorie SSI",
    choices: &[
        choice("", "À préciser"),
        choice("1", "Catégorie 1"),
        choice("2", "Catégorie 2"),
        choice("3", "Catégorie 3"),
        choice("4", "Catégorie 4"),
    ],
};

static ESTABLISHMENT_TYPE: Catalog = Catalog {
    id: CatalogId::EstablishmentType,
    title: "Type d'ERP",
    choices: &[
        choice("", "À préciser"),
        choice("J", "Type J - Structures d'accueil pour personnes âgées et personnes handicapées"),
        choice("L", "Type L - Salles d'audition, de conférences, de réunions, de spectacles ou à usages multiples"),
        choice("M", "Type M - Magasins de vente, centres commerciaux"),
        choice("N", "Type N - Restaurants et débits de boissons"),
        choice("O", "Type O - Hôtels et pensions de famille"),
        choice("P", "Type P - Salles de danse et salles de jeux"),
        choice("R", "Type R - Établissements d'éveil, d'enseignement, de formation"),
        choice("S", "Type S - Bibliothèques, centres de documentation"),
        choice("T", "Type T - Salles d'exposition à vocation commerciale"),
        choice("U", "Type U - Établissements de soins"),
        choice("V", "Type V - Établissements de culte"),
        choice("W", "Type W - Administrations, banques, bureaux"),
        choice("X", "Type X - Établissements sportifs couverts"),
        choice("Y", "Type Y - Musées"),
        choice("PA", "Type PA - Établissements de plein air"),
        choice("CTS", "Type CTS - Chapiteaux, tentes et structures"),
        choice("SG", "Type SG - Structures gonflables"),
        choice("OA", "Type OA - Hôtels-restaurants d'altitude"),
        choice("GA", "Type GA - Gares accessibles au public"),
        choice("EF", "Type EF - Établissements flottants"),
        choice("REF", "Type REF - Refuges de montagne"),
    ],
};

static ESTABLISHMENT_CATEGORY: Catalog = Catalog {
    id: CatalogId::EstablishmentCategory,
    title: "Catégorie d'ERP",
    choices: &[
        choice("", "À préciser"),
        choice("1", "1re catégorie (plus de 1 500 personnes)"),
        choice("2", "2e catégorie (de 701 à 1 500 personnes)"),
        choice("3", "3e catégorie (de 301 à 700 personnes)"),
        choice("4", "4e catégorie (300 personnes et moins)"),
        choice("5", "5e catégorie (sous le seuil d'assujettissement du type)"),
    ],
};

// -- Fire safety --------------------------------------------------------------

static EVACUATION: Catalog = Catalog {
    id: CatalogId::Evacuation,
    title: "Moyens d'évacuation",
    choices: &[
        choice("degagements_conformes", "Dégagements en nombre et largeur réglementaires (UP)"),
        choice("eclairage_securite", "Éclairage de sécurité (BAES / LSC)"),
        choice("signaletique_evac", "Signalétique d'évacuation"),
        choice("alarme_sonore", "Alarme sonore générale"),
        choice("portes_antipanique", "Portes de sortie équipées de dispositifs anti-panique"),
        choice("espaces_attente", "Espaces d'attente sécurisés (EAS)"),
        choice("plans_evacuation", "Plans d'évacuation affichés"),
    ],
};

static SUPPRESSION: Catalog = Catalog {
    id: CatalogId::Suppression,
    title: "Moyens d'extinction",
    choices: &[
        choice("extincteurs", "Extincteurs portatifs appropriés aux risques"),
        choice("ria", "Robinets d'incendie armés (RIA)"),
        choice("sprinklers", "Extinction automatique à eau (sprinklers)"),
        choice("colonnes_seches", "Colonnes sèches"),
        choice("colonnes_humides", "Colonnes humides"),
        choice("poteaux_incendie", "Poteaux d'incendie à proximité"),
        choice("extinction_gaz", "Extinction automatique à gaz des locaux techniques"),
    ],
};

static DETECTION: Catalog = Catalog {
    id: CatalogId::Detection,
    title: "Détection et alarme",
    choices: &[
        choice("detection_generalisee", "Détection automatique d'incendie généralisée"),
        choice("detection_locaux_risques", "Détection dans les locaux à risques"),
        choice("declencheurs_manuels", "Déclencheurs manuels"),
        choice("cmsi", "Centralisateur de mise en sécurité incendie (CMSI)"),
        choice("asservissements", "Asservissements (portes, clapets, désenfumage)"),
        choice("alarme_restreinte", "Alarme restreinte au poste de sécurité"),
        choice("flashs_lumineux", "Diffuseurs lumineux dans les sanitaires et lieux isolés"),
    ],
};

static COMPARTMENTATION: Catalog = Catalog {
    id: CatalogId::Compartmentation,
    title: "Compartimentage",
    choices: &[
        choice("recoupements_ei", "Recoupements coupe-feu des niveaux et volumes"),
        choice("locaux_risques_importants", "Locaux à risques importants isolés (EI 120)"),
        choice("locaux_risques_moyens", "Locaux à risques moyens isolés (EI 60)"),
        choice("portes_coupe_feu", "Portes coupe-feu à fermeture automatique"),
        choice("clapets_coupe_feu", "Clapets coupe-feu sur les réseaux aérauliques"),
        choice("calfeutrements", "Calfeutrement des traversées de parois"),
    ],
};

static SMOKE_EXTRACTION: Catalog = Catalog {
    id: CatalogId::SmokeExtraction,
    title: "Désenfumage",
    choices: &[
        choice("naturel", "Désenfumage naturel (exutoires, ouvrants en façade)"),
        choice("mecanique", "Désenfumage mécanique"),
        choice("escaliers", "Désenfumage des escaliers"),
        choice("circulations", "Désenfumage des circulations horizontales"),
        choice("locaux_300", "Désenfumage des locaux de plus de 300 m²"),
        choice("amenees_air", "Amenées d'air neuf"),
    ],
};

// -- Accessibility ------------------------------------------------------------

static RECEPTION: Catalog = Catalog {
    id: CatalogId::Reception,
    title: "Accueil du public",
    choices: &[
        choice("banque_surbaissee", "Banque d'accueil avec partie surbaissée"),
        choice("boucle_magnetique", "Boucle à induction magnétique"),
        choice("personnel_forme", "Personnel formé à l'accueil des personnes handicapées"),
        choice("assises_attente", "Espace d'attente équipé d'assises"),
        choice("eclairage_accueil", "Éclairage renforcé au droit de l'accueil"),
    ],
};

static HORIZONTAL_CIRCULATION: Catalog = Catalog {
    id: CatalogId::HorizontalCirculation,
    title: "Cheminements horizontaux",
    choices: &[
        choice("largeur_140", "Cheminements d'une largeur minimale de 1,40 m"),
        choice("pentes_paliers", "Pentes inférieures à 5 % avec paliers de repos"),
        choice("ressauts", "Ressauts inférieurs à 2 cm à bords arrondis"),
        choice("sol_non_glissant", "Revêtements de sol non glissants"),
        choice("contrastes", "Contrastes visuels et tactiles"),
        choice("portes_90", "Portes d'un passage utile d'au moins 0,90 m"),
    ],
};

static VERTICAL_CIRCULATION: Catalog = Catalog {
    id: CatalogId::VerticalCirculation,
    title: "Cheminements verticaux",
    choices: &[
        choice("ascenseur", "Ascenseur accessible"),
        choice("elevateur", "Élévateur pour personnes à mobilité réduite"),
        choice("escaliers_conformes", "Escaliers avec mains courantes et nez de marche contrastés"),
        choice("bande_eveil", "Bandes d'éveil de vigilance en haut des escaliers"),
    ],
};

static SANITARY: Catalog = Catalog {
    id: CatalogId::Sanitary,
    title: "Sanitaires",
    choices: &[
        choice("cabinet_adapte", "Cabinet d'aisances adapté à chaque niveau"),
        choice("aire_rotation", "Aire de rotation de 1,50 m de diamètre"),
        choice("barre_appui", "Barre d'appui latérale"),
        choice("lavabo_accessible", "Lavabo accessible en position assise"),
        choice("urinoir_bas", "Urinoir positionné à hauteur adaptée"),
    ],
};

static PARKING: Catalog = Catalog {
    id: CatalogId::Parking,
    title: "Stationnement",
    choices: &[
        choice("places_adaptees", "Places adaptées (2 % du nombre total)"),
        choice("largeur_330", "Places d'une largeur minimale de 3,30 m"),
        choice("signalisation_places", "Signalisation verticale et marquage au sol"),
        choice("cheminement_stationnement", "Cheminement accessible depuis les places"),
    ],
};

static SIGNAGE: Catalog = Catalog {
    id: CatalogId::Signage,
    title: "Signalétique",
    choices: &[
        choice("signaletique_contrastee", "Signalétique contrastée et lisible"),
        choice("pictogrammes", "Pictogrammes normalisés"),
        choice("information_doublee", "Information sonore doublée d'une information visuelle"),
        choice("balises_sonores", "Balises sonores"),
        choice("plan_relief", "Plan en relief à l'entrée"),
    ],
};

static COMFORT: Catalog = Catalog {
    id: CatalogId::Comfort,
    title: "Confort d'usage",
    choices: &[
        choice("eclairage_100", "Éclairage d'au moins 100 lux sur les cheminements"),
        choice("acoustique", "Traitement acoustique des espaces d'accueil"),
        choice("mobilier_adapte", "Mobilier adapté (hauteur, vide en partie basse)"),
        choice("commandes_accessibles", "Dispositifs de commande entre 0,90 m et 1,30 m"),
        choice("emplacements_fauteuils", "Emplacements réservés aux fauteuils roulants"),
    ],
};
