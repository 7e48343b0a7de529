//! Static reference table of known leaf conditions.
//!
//! Built once on first access and never mutated. Exactly one entry is the
//! `healthy` sentinel used whenever no pathology is reported.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::models::disease::{CropFamily, Disease, Severity, TreatmentPlan, AUTO_CROP, HEALTHY_ID};

pub const UNKNOWN_ID: &str = "unknown";

static CROP_FAMILIES: [CropFamily; 10] = [
    CropFamily { id: "tomato", name: "Tomato", icon: "🍅" },
    CropFamily { id: "potato", name: "Potato", icon: "🥔" },
    CropFamily { id: "corn", name: "Corn", icon: "🌽" },
    CropFamily { id: "wheat", name: "Wheat", icon: "🌾" },
    CropFamily { id: "grape", name: "Grape", icon: "🍇" },
    CropFamily { id: "apple", name: "Apple", icon: "🍎" },
    CropFamily { id: "rice", name: "Rice", icon: "🌾" },
    CropFamily { id: "pepper", name: "Pepper", icon: "🌶️" },
    CropFamily { id: "citrus", name: "Citrus", icon: "🍊" },
    CropFamily { id: AUTO_CROP, name: "Auto Detect", icon: "🔍" },
];

static DISEASES: Lazy<Vec<Disease>> = Lazy::new(build_catalog);

/// Read-only view over the built-in disease table.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiseaseCatalog;

impl DiseaseCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn all(&self) -> &'static [Disease] {
        DISEASES.as_slice()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&'static Disease> {
        DISEASES.iter().find(|disease| disease.id == id)
    }

    /// Entries for `crop_family`; the whole table for `auto`.
    pub fn list_by_crop_family(&self, crop_family: &str) -> Vec<&'static Disease> {
        if crop_family == AUTO_CROP {
            return DISEASES.iter().collect();
        }
        DISEASES
            .iter()
            .filter(|disease| disease.crop_family == crop_family)
            .collect()
    }

    pub fn healthy(&self) -> &'static Disease {
        DISEASES
            .iter()
            .find(|disease| disease.id == HEALTHY_ID)
            .unwrap_or_else(|| unreachable!("catalog always contains the healthy sentinel"))
    }

    pub fn crop_families(&self) -> &'static [CropFamily] {
        &CROP_FAMILIES
    }

    pub fn is_known_crop(&self, id: &str) -> bool {
        CROP_FAMILIES.iter().any(|family| family.id == id)
    }

    /// Maps a raw model class id onto the catalog. Unmapped classes get a
    /// low-severity placeholder instead of an error.
    pub fn resolve_prediction(&self, class_id: &str) -> Disease {
        let trimmed = class_id.trim();
        if let Some(disease) = self.find_by_id(trimmed) {
            return disease.clone();
        }

        debug!(target: "app::catalog", class_id = trimmed, "unmapped prediction class");
        Disease {
            id: UNKNOWN_ID.to_string(),
            name: format!("Unknown Detection ({trimmed})"),
            scientific_name: None,
            pathogen_type: None,
            spread_mechanism: None,
            crop_family: AUTO_CROP.to_string(),
            recommendations: Vec::new(),
            severity: Severity::Low,
            treatment: TreatmentPlan {
                recovery_timeline: "Unknown".to_string(),
                ..TreatmentPlan::default()
            },
            beginner_description:
                "We detected an anomaly but aren't sure exactly what it is.".to_string(),
            advanced_description: format!(
                "Class '{trimmed}' predicted but not found in disease registry."
            ),
            common_regions: Vec::new(),
            seasonal_risk: Vec::new(),
            health_score_impact: 10,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn build_catalog() -> Vec<Disease> {
    vec![
        Disease {
            id: "tomato-early-blight".into(),
            name: "Tomato Early Blight".into(),
            scientific_name: Some("Alternaria solani".into()),
            pathogen_type: Some("Fungal pathogen (Ascomycete)".into()),
            spread_mechanism: Some("Wind-borne spores, rain splash, contaminated soil debris. Survives in plant residue over winter.".into()),
            crop_family: "tomato".into(),
            recommendations: strings(&[
                "Remove infected leaves immediately",
                "Apply copper-based fungicide spray",
                "Increase airflow around plants",
                "Water at soil level, avoid wetting leaves",
                "Mulch to prevent soil splash",
            ]),
            severity: Severity::Medium,
            treatment: TreatmentPlan {
                immediate: strings(&[
                    "Remove all affected leaves and stems; bag and dispose, do not compost",
                    "Isolate infected plants from healthy ones if possible",
                    "Reduce overhead watering immediately",
                ]),
                organic: strings(&[
                    "Neem oil spray (2 tbsp per gallon water) every 7 days",
                    "Copper fungicide (Bordeaux mixture) application",
                    "Baking soda spray (1 tbsp per gallon + liquid soap)",
                    "Compost tea foliar spray to boost beneficial microbes",
                ]),
                chemical: strings(&[
                    "Chlorothalonil-based fungicide (e.g., Daconil)",
                    "Mancozeb 75% WP, apply at 2g/L every 10 days",
                    "Azoxystrobin (Quadris) for systemic protection",
                ]),
                prevention: strings(&[
                    "Rotate crops; avoid planting tomatoes in same spot for 3 years",
                    "Plant resistant varieties (e.g., Mountain Magic, Defiant)",
                    "Mulch heavily to prevent soil splash onto lower leaves",
                    "Ensure 24\" spacing between plants for air circulation",
                    "Water early morning at soil level only",
                ]),
                recovery_timeline: "2-4 weeks with proper treatment. New growth should appear healthy within 10 days of fungicide application.".into(),
            },
            beginner_description: "Your tomato plant has dark spots on its lower leaves that spread outward in rings. This is a common fungal issue that can be treated with simple sprays.".into(),
            advanced_description: "Alternaria solani infection detected. Characteristic concentric ring lesions (target spots) on older foliage indicate early blight. The fungus overwinters in plant debris and produces conidia that spread via wind and rain splash. Optimal conditions: 75-85°F with alternating wet/dry periods.".into(),
            common_regions: strings(&["Southeast US", "Midwest US", "Mediterranean", "South Asia", "East Africa"]),
            seasonal_risk: strings(&["Late Spring", "Summer", "Early Fall"]),
            health_score_impact: 35,
        },
        Disease {
            id: "tomato-late-blight".into(),
            name: "Tomato Late Blight".into(),
            scientific_name: Some("Phytophthora infestans".into()),
            pathogen_type: Some("Oomycete (water mold)".into()),
            spread_mechanism: Some("Airborne sporangia can travel 30+ miles. Thrives in cool, wet conditions. Devastated Irish potato crops in 1845.".into()),
            crop_family: "tomato".into(),
            recommendations: strings(&[
                "Remove and destroy infected plants",
                "Apply fungicide immediately",
                "Improve air circulation",
                "Avoid overhead watering",
                "Plant resistant varieties next season",
            ]),
            severity: Severity::High,
            treatment: TreatmentPlan {
                immediate: strings(&[
                    "URGENT: Remove and destroy all infected plant material immediately",
                    "Do NOT compost infected tissue; burn or bag for landfill",
                    "Alert nearby gardeners, this spreads rapidly",
                    "Apply fungicide to remaining healthy plants within 24 hours",
                ]),
                organic: strings(&[
                    "Copper hydroxide spray, apply immediately and repeat every 5-7 days",
                    "Bacillus subtilis (Serenade) biological fungicide",
                    "Remove lower 12\" of foliage to reduce humidity around stems",
                ]),
                chemical: strings(&[
                    "Mefenoxam/Metalaxyl (Ridomil Gold) systemic protection",
                    "Cymoxanil + Mancozeb combination spray",
                    "Phosphorous acid (Phostrol) as preventive drench",
                ]),
                prevention: strings(&[
                    "Plant only certified disease-free transplants",
                    "Choose resistant varieties (e.g., Mountain Merit, Plum Regal)",
                    "Avoid planting near potatoes (shared pathogen)",
                    "Install drip irrigation to keep foliage dry",
                    "Monitor weather forecasts; apply preventive spray before cool/wet periods",
                ]),
                recovery_timeline: "Severe cases: affected plants rarely recover fully. With early detection and aggressive treatment, spread can be contained in 1-2 weeks. Healthy new growth in 2-3 weeks.".into(),
            },
            beginner_description: "This is a serious infection causing large dark blotches on leaves and stems. The plant needs immediate attention: remove sick parts right away and treat with fungicide.".into(),
            advanced_description: "Phytophthora infestans detected, the same oomycete responsible for the Irish Potato Famine. Water-soaked lesions with white sporulation on leaf undersides indicate active infection. Sporangia are wind-dispersed and can initiate new infections in 8-12 hours under favorable conditions (50-60°F, >90% humidity).".into(),
            common_regions: strings(&["Northern US", "UK", "Ireland", "Northern Europe", "Andes Region"]),
            seasonal_risk: strings(&["Late Summer", "Fall", "Cool Wet Periods"]),
            health_score_impact: 65,
        },
        Disease {
            id: "potato-late-blight".into(),
            name: "Potato Late Blight".into(),
            scientific_name: Some("Phytophthora infestans".into()),
            pathogen_type: Some("Oomycete (water mold)".into()),
            spread_mechanism: Some("Soilborne via infected tubers, airborne sporangia. Can survive in volunteer potatoes and cull piles.".into()),
            crop_family: "potato".into(),
            recommendations: strings(&[
                "Remove infected foliage",
                "Apply copper fungicide",
                "Harvest tubers quickly if disease spreads",
                "Ensure good drainage",
                "Use certified disease-free seed potatoes",
            ]),
            severity: Severity::High,
            treatment: TreatmentPlan {
                immediate: strings(&[
                    "Kill all above-ground foliage (vine kill) to prevent tuber infection",
                    "Wait 2-3 weeks before harvesting to let skin set",
                    "Remove all volunteer potato plants in the area",
                ]),
                organic: strings(&[
                    "Copper-based fungicide (Bordeaux mixture) every 5-7 days during wet weather",
                    "Bacillus amyloliquefaciens biological control agent",
                    "Hilling potatoes deeply to protect tubers from sporangia wash-down",
                ]),
                chemical: strings(&[
                    "Mancozeb + Cymoxanil preventive/curative spray",
                    "Metalaxyl-M (Ridomil Gold) soil drench for tuber protection",
                    "Fluazinam (Shirlan) protective spray every 7-10 days",
                ]),
                prevention: strings(&[
                    "Use ONLY certified disease-free seed potatoes",
                    "Destroy cull piles and volunteer plants every spring",
                    "Plant resistant varieties (e.g., Sarpo Mira, Defender)",
                    "Maintain 3-year crop rotation away from solanaceous crops",
                    "Monitor blight forecasting services (e.g., BlightWatch)",
                ]),
                recovery_timeline: "Tubers may still be salvageable if harvested carefully after vine kill. Sort stored potatoes frequently; infected tubers rot within 2-4 weeks.".into(),
            },
            beginner_description: "Your potato plant has brown, water-soaked patches that are spreading fast. This is serious, so act quickly to save the tubers underground.".into(),
            advanced_description: "P. infestans zoospores have infected the foliage. Characteristic brown lesions with light green halos and white mycelial growth on abaxial leaf surfaces. Risk of tuber infection via sporangia washing through soil profile during rain events.".into(),
            common_regions: strings(&["Northern Europe", "Pacific Northwest US", "Andes", "Central Asia", "East Africa"]),
            seasonal_risk: strings(&["Summer", "Early Fall"]),
            health_score_impact: 60,
        },
        Disease {
            id: "potato-early-blight".into(),
            name: "Potato Early Blight".into(),
            scientific_name: Some("Alternaria solani".into()),
            pathogen_type: Some("Fungal pathogen (Ascomycete)".into()),
            spread_mechanism: Some("Soil-borne and airborne conidia. Overwinters in crop debris. Favors stressed plants.".into()),
            crop_family: "potato".into(),
            recommendations: strings(&[
                "Remove lower infected leaves",
                "Apply fungicide every 7-10 days",
                "Maintain plant vigor with proper fertilization",
                "Rotate crops annually",
                "Mulch to reduce soil splash",
            ]),
            severity: Severity::Medium,
            treatment: TreatmentPlan {
                immediate: strings(&[
                    "Remove the lowest 8-10 leaves showing symptoms",
                    "Apply nitrogen fertilizer to boost plant vigor",
                    "Begin fungicide program immediately",
                ]),
                organic: strings(&[
                    "Neem oil weekly spray during active growth",
                    "Copper fungicide every 7-10 days",
                    "Trichoderma-based biofungicide soil application",
                ]),
                chemical: strings(&[
                    "Chlorothalonil (Bravo) preventive spray",
                    "Azoxystrobin (Amistar) systemic fungicide",
                    "Difenoconazole + Azoxystrobin combination",
                ]),
                prevention: strings(&[
                    "Maintain adequate nitrogen fertility; stressed plants are most susceptible",
                    "Irrigate consistently to avoid plant stress",
                    "3-year rotation away from Solanaceae family",
                    "Remove all crop debris after harvest",
                    "Hill potatoes to protect tubers",
                ]),
                recovery_timeline: "10-14 days with consistent fungicide application. Maintain treatment through harvest for best tuber quality.".into(),
            },
            beginner_description: "The dark target-shaped spots on lower leaves are a common fungal problem. Keep your plant well-fed and apply a simple copper spray to manage it.".into(),
            advanced_description: "Alternaria solani infection characterized by bullseye-pattern necrotic lesions on senescent foliage. Pathogen preferentially attacks nutrient-deficient or stressed tissue. Conidia production peaks at 77-86°F with alternating wet/dry cycles.".into(),
            common_regions: strings(&["Global temperate zones", "Midwest US", "Northern India", "Central Europe"]),
            seasonal_risk: strings(&["Mid-Summer", "Late Summer"]),
            health_score_impact: 30,
        },
        Disease {
            id: "corn-rust".into(),
            name: "Corn Common Rust".into(),
            scientific_name: Some("Puccinia sorghi".into()),
            pathogen_type: Some("Obligate biotrophic fungus (Basidiomycete)".into()),
            spread_mechanism: Some("Wind-dispersed urediniospores can travel hundreds of miles. Cannot survive without living host tissue.".into()),
            crop_family: "corn".into(),
            recommendations: strings(&[
                "Plant resistant hybrids",
                "Apply fungicide if severe",
                "Ensure adequate plant spacing",
                "Remove heavily infected leaves",
                "Monitor regularly during humid weather",
            ]),
            severity: Severity::Low,
            treatment: TreatmentPlan {
                immediate: strings(&[
                    "Monitor pustule density; treatment usually only needed above 1 pustule per leaf",
                    "Scout fields regularly during tasseling stage",
                    "Remove heavily infected lower leaves if practical",
                ]),
                organic: strings(&[
                    "Sulfur-based fungicide spray as preventive",
                    "Potassium bicarbonate foliar spray",
                    "Maintain plant health through balanced fertilization",
                ]),
                chemical: strings(&[
                    "Azoxystrobin + Propiconazole (Quilt) at tasseling",
                    "Pyraclostrobin (Headline) single application",
                    "Trifloxystrobin (Flint) preventive spray",
                ]),
                prevention: strings(&[
                    "Plant Rp gene-resistant hybrids (consult local extension)",
                    "Early planting to escape peak rust pressure",
                    "Balanced fertility; excess nitrogen increases susceptibility",
                    "Ensure adequate stand density for good air circulation",
                ]),
                recovery_timeline: "Minor infections: plants outgrow damage within 2-3 weeks. Yield impact typically <5% in resistant hybrids.".into(),
            },
            beginner_description: "Those small reddish-brown bumps on the corn leaves are rust, a common fungal issue. Most modern corn varieties can handle this, but keep an eye on it.".into(),
            advanced_description: "Puccinia sorghi uredinia observed. Cinnamon-brown oval pustules on both leaf surfaces indicate active uredinial stage. The pathogen requires an alternate host (Oxalis spp.) for sexual reproduction. Most significant yield impact occurs when infection begins before tasseling.".into(),
            common_regions: strings(&["Corn Belt US", "Brazil", "Sub-Saharan Africa", "Southeast Asia"]),
            seasonal_risk: strings(&["Mid-Summer", "Late Summer"]),
            health_score_impact: 15,
        },
        Disease {
            id: "wheat-rust".into(),
            name: "Wheat Leaf Rust".into(),
            scientific_name: Some("Puccinia triticina".into()),
            pathogen_type: Some("Obligate biotrophic fungus (Basidiomycete)".into()),
            spread_mechanism: Some("Long-distance wind dispersal of urediniospores. Major pathotype shifts driven by sexual recombination on alternate hosts.".into()),
            crop_family: "wheat".into(),
            recommendations: strings(&[
                "Use resistant wheat varieties",
                "Apply fungicide at first sign",
                "Plant early to avoid disease peak",
                "Remove volunteer wheat plants",
                "Monitor weather conditions",
            ]),
            severity: Severity::Medium,
            treatment: TreatmentPlan {
                immediate: strings(&[
                    "Apply fungicide immediately if flag leaf is threatened",
                    "Scout for rust severity; economic threshold is 1-5% on flag leaf",
                    "Prioritize protecting the top two leaves",
                ]),
                organic: strings(&[
                    "Limited organic options; focus on resistant varieties",
                    "Sulfur dust application may provide partial control",
                    "Silica-based foliar sprays to strengthen leaf cuticle",
                ]),
                chemical: strings(&[
                    "Tebuconazole (Folicur) single application at flag leaf emergence",
                    "Propiconazole + Azoxystrobin (Quilt Xcel) dual-mode",
                    "Metconazole (Caramba) for resistant populations",
                ]),
                prevention: strings(&[
                    "Plant varieties with Lr gene resistance (consult regional breeding programs)",
                    "Destroy volunteer wheat and alternate hosts (Thalictrum spp.)",
                    "Adjust planting date based on regional rust forecasts",
                    "Balanced nitrogen; avoid excess N application",
                ]),
                recovery_timeline: "Single fungicide application protects for 21-28 days. If flag leaf is protected, yield impact is minimal.".into(),
            },
            beginner_description: "Orange-brown dusty spots on wheat leaves mean rust fungus is present. One spray at the right time can protect your crop effectively.".into(),
            advanced_description: "Puccinia triticina uredinia detected. Orange-brown circular pustules primarily on adaxial leaf surface. Race analysis recommended to guide Lr gene deployment. Aecial stage occurs on Thalictrum spp. in regions where sexual cycle completes.".into(),
            common_regions: strings(&["Great Plains US", "South America", "South Asia", "Australia", "East Africa"]),
            seasonal_risk: strings(&["Spring", "Early Summer"]),
            health_score_impact: 35,
        },
        Disease {
            id: "grape-black-rot".into(),
            name: "Grape Black Rot".into(),
            scientific_name: Some("Guignardia bidwellii".into()),
            pathogen_type: Some("Fungal pathogen (Ascomycete)".into()),
            spread_mechanism: Some("Rain-splash of ascospores from overwintering mummies. Infection requires 6+ hours of leaf wetness.".into()),
            crop_family: "grape".into(),
            recommendations: strings(&[
                "Remove mummified berries",
                "Prune for better air circulation",
                "Apply fungicide from bloom through harvest",
                "Remove infected leaves",
                "Practice good sanitation",
            ]),
            severity: Severity::High,
            treatment: TreatmentPlan {
                immediate: strings(&[
                    "Remove ALL mummified berries from vines and ground; this is the primary inoculum",
                    "Prune out infected canes during dormant season",
                    "Begin fungicide program before bloom",
                ]),
                organic: strings(&[
                    "Sulfur spray every 7-10 days from bud break through veraison",
                    "Copper hydroxide (Kocide) at bud swell",
                    "Thorough canopy management to reduce leaf wetness duration",
                ]),
                chemical: strings(&[
                    "Myclobutanil (Rally), excellent systemic activity, apply at bloom",
                    "Mancozeb (Dithane) protective spray pre-bloom",
                    "Azoxystrobin (Abound) + Tebuconazole tank mix for resistance management",
                ]),
                prevention: strings(&[
                    "Remove ALL mummies; a single mummified berry can produce 1M+ spores",
                    "Open canopy architecture for maximum air flow",
                    "Orient rows for morning sun exposure to dry dew quickly",
                    "Maintain spray program from 10\" shoot growth through 4 weeks post-bloom",
                    "Consider resistant varieties (e.g., Chambourcin, Norton)",
                ]),
                recovery_timeline: "Infected berries cannot recover. Focus shifts to protecting remaining healthy fruit. Full season management needed; expect 2-3 years to achieve clean vineyard from heavy infection.".into(),
            },
            beginner_description: "The berries are turning hard, black, and shriveled; this is black rot fungus. Remove all the dried-up berries and start spraying before flowers open next year.".into(),
            advanced_description: "Guignardia bidwellii infection confirmed. Tan leaf lesions with dark borders precede berry infection. Ascospore discharge from pseudothecia in overwintering mummies is primary inoculum. Berry susceptibility peaks from bloom through 4 weeks post-bloom, then declines sharply as sugar content rises.".into(),
            common_regions: strings(&["Eastern US", "Southeast US", "Southern Europe", "Humid wine regions"]),
            seasonal_risk: strings(&["Late Spring", "Summer"]),
            health_score_impact: 55,
        },
        Disease {
            id: "apple-scab".into(),
            name: "Apple Scab".into(),
            scientific_name: Some("Venturia inaequalis".into()),
            pathogen_type: Some("Fungal pathogen (Ascomycete)".into()),
            spread_mechanism: Some("Ascospores from leaf litter in spring, then conidia for secondary spread. Requires 9+ hours leaf wetness for infection.".into()),
            crop_family: "apple".into(),
            recommendations: strings(&[
                "Rake and remove fallen leaves",
                "Apply fungicide at bud break",
                "Prune to improve air circulation",
                "Plant resistant varieties",
                "Continue spraying through wet weather",
            ]),
            severity: Severity::Medium,
            treatment: TreatmentPlan {
                immediate: strings(&[
                    "Apply curative fungicide within 72 hours of infection period",
                    "Remove heavily scabbed fruit to reduce secondary inoculum",
                    "Maintain spray schedule through primary scab season (green tip to 2nd cover)",
                ]),
                organic: strings(&[
                    "Sulfur spray; apply before rain events during primary season",
                    "Lime-sulfur at green tip for early protection",
                    "Urea spray (5%) on fallen leaves in autumn to accelerate decomposition",
                ]),
                chemical: strings(&[
                    "Captan + Myclobutanil combination for preventive/curative activity",
                    "Dodine (Syllit) for early-season protective sprays",
                    "Difenoconazole (Inspire) post-infection kickback treatment",
                ]),
                prevention: strings(&[
                    "Shred or remove fallen leaves in autumn (reduces spring inoculum 80%+)",
                    "Plant scab-resistant cultivars (e.g., Liberty, Enterprise, GoldRush)",
                    "Prune for open center canopy to speed leaf drying",
                    "Use Mills Table infection periods to time sprays precisely",
                    "Maintain spray coverage on new growth through June",
                ]),
                recovery_timeline: "Existing scab lesions are permanent but sporulation can be stopped. Clean new growth within 7-14 days of effective treatment. Long-term: 1-2 years of good sanitation dramatically reduces pressure.".into(),
            },
            beginner_description: "Dark, scaly patches on leaves and fruit are apple scab. Clean up fallen leaves in autumn and spray at bud break; that alone makes a big difference.".into(),
            advanced_description: "Venturia inaequalis ascospore-driven primary infection confirmed. Olive-green velvety lesions on adaxial leaf surface with conidiophore production indicate active sporulation. Use Mills Table (temperature × wetness duration) to predict infection periods and optimize spray timing.".into(),
            common_regions: strings(&["Northeast US", "Pacific Northwest", "Northern Europe", "UK", "New Zealand"]),
            seasonal_risk: strings(&["Spring", "Early Summer"]),
            health_score_impact: 30,
        },
        Disease {
            id: HEALTHY_ID.into(),
            name: "Healthy Plant".into(),
            scientific_name: None,
            pathogen_type: None,
            spread_mechanism: None,
            crop_family: AUTO_CROP.into(),
            recommendations: strings(&[
                "Continue regular watering schedule",
                "Maintain proper fertilization",
                "Monitor for early signs of stress",
                "Ensure good air circulation",
                "Keep area free of plant debris",
            ]),
            severity: Severity::Low,
            treatment: TreatmentPlan {
                immediate: strings(&[
                    "No treatment needed, your plant looks great!",
                    "Continue current care routine",
                ]),
                organic: strings(&[
                    "Compost tea foliar spray monthly for micronutrient boost",
                    "Mulch 2-3 inches around base for moisture retention",
                    "Introduce beneficial insects (ladybugs, lacewings)",
                ]),
                chemical: strings(&[
                    "No chemical treatment required",
                    "Consider slow-release balanced fertilizer if growth is slow",
                ]),
                prevention: strings(&[
                    "Regular monitoring to catch problems early",
                    "Maintain consistent watering schedule",
                    "Practice crop rotation annually",
                    "Keep tools clean to prevent pathogen spread",
                    "Test soil pH annually",
                ]),
                recovery_timeline: "No recovery needed. Maintain current practices for continued plant health.".into(),
            },
            beginner_description: "Great news! Your plant looks healthy with no signs of disease. Keep doing what you're doing!".into(),
            advanced_description: "No pathogenic signatures detected. Leaf coloration, turgor, and morphology within normal parameters. Chlorophyll distribution appears uniform. No evidence of biotic or abiotic stress markers.".into(),
            common_regions: Vec::new(),
            seasonal_risk: Vec::new(),
            health_score_impact: 0,
        },
    ]
}
