use super::{to_strings, BreakdownGroup, CategoryProfile, SubcategoryHints};
use crate::pipeline::classify::{CategoryRule, KeywordException};

fn flatten(blocks: &[&[&str]]) -> Vec<String> {
    blocks.iter().flat_map(|block| to_strings(block)).collect()
}

// Shared keyword blocks. Leading/trailing spaces are significant.

const NOISE: &[&str] = &["incl. of all taxes", "buy ", "online", "combo"];

const NON_FOOD: &[&str] = &[
    "laundry", "detergent", "soap", "shampoo", "toothpaste", "cleaner", "wipes", "tissue", "diaper",
    "sanitary", "pet food",
];

const MEAT: &[&str] = &["chicken", "meat", "fish", "mutton", "lamb", "goat", "prawn", "seafood"];

const EGGS: &[&str] = &["egg ", " eggs"];

const BAKERY: &[&str] = &[
    "bread", "bun", "buns", "bakery", "biscuit", "biscuits", "cake", "cakes", "pastry", "pastries",
];

const STAPLES: &[&str] = &[
    "atta", "flour", "besan", "sooji", "rava", "rice", "dal", "pulse", "oil", "sunflower oil",
    "groundnut oil",
];

const FRESH_PRODUCE: &[&str] = &["fresh fruit", "fresh fruits", "fresh vegetable", "fresh vegetables"];

const FRESH_PROTEIN: &[&str] = &["fresh meat", "fresh fish", "fresh chicken"];

const DAIRY: &[&str] = &[
    "milk ", " milk", "curd", "yogurt", "yoghurt", "paneer", "cheese", "butter", "cream", "ghee",
];

const SPICES: &[&str] = &[
    "masala", "spice", "spices", "turmeric", "cumin", "coriander", "cardamom",
];

const CEREALS: &[&str] = &["cereal", "corn flakes", "chocos", "muesli", "oats", "granola"];

const SPREADS_AND_SAUCES: &[&str] = &[
    "ketchup", "sauce", "honey", "jam", "jelly", "spread", "peanut butter",
];

const MAYO: &[&str] = &["mayonnaise", "mayo"];

const PACKAGED: &[&str] = &[
    "noodle", "noodles", "pasta", "soup", "soups", "pickle", "pickles", "papad", "papads",
    "achaar", "chutney", "chutneys", "ready to cook", "ready-to-cook", "ready to eat",
    "ready-to-eat", "baby food", "infant food",
];

const HOT_BEVERAGES: &[&str] = &["tea", "coffee"];

// Subcategory exclusions shared by most listing pages.
const SUB_EXCLUDED_STAPLES: &[&str] = &[
    "meat", "fish", "egg", "eggs", "chicken", "mutton", "rice", "atta", "oil", "dal", "pulse",
    "vegetable", "fruit",
];

pub(super) fn profiles() -> Vec<CategoryProfile> {
    vec![
        breakfast_sauces(),
        cold_drinks_juices(),
        frozen_foods(),
        fruits_vegetables(),
        meat_fish_eggs(),
        packaged_food(),
        tea_coffee_more(),
    ]
}

fn breakfast_sauces() -> CategoryProfile {
    let nut_butters = &["peanut butter", "almond butter", "nut butter"];
    CategoryProfile {
        slug: "breakfast-sauces".into(),
        title: "Breakfast & Sauces".into(),
        url: "https://www.zepto.com/cn/breakfast-sauces/breakfast-sauces/cid/f804bccc-c565-4879-b6ab-1b964bb1ed41/scid/68922181-4e0e-4a6b-9862-cf1a02ba240e".into(),
        rule: CategoryRule {
            valid: flatten(&[
                &[
                    "cereal", "corn flakes", "chocos", "choco flakes", "muesli", "oat", "oats",
                    "granola", "wheat flakes", "bran", "breakfast cereal", "museli",
                    "instant oats", "rolled oats", "steel cut oats",
                ],
                &[
                    "honey", "jam", "jelly", "fruit spread", "chocolate spread", "hazelnut spread",
                    "nutella", "choco spread", "marmalade",
                ],
                nut_butters,
                &[
                    "ketchup", "tomato ketchup", "sauce", "sauces", "chilli sauce", "soy sauce",
                    "soya sauce", "hot sauce", "mustard sauce", "pizza sauce", "pasta sauce",
                    "schezwan", "schezuan", "dressing", "dip", "dips", "mayonnaise", "mayo",
                    "salad dressing",
                ],
                &[
                    "pancake mix", "waffle mix", "cake mix", "brownie mix", "idli mix", "dosa mix",
                    "batter", "batters", "ready mix",
                ],
                &[
                    "tea", "green tea", "black tea", "chai", "ctc tea", "coffee", "instant coffee",
                    "filter coffee", "ground coffee", "coffee powder", "hot chocolate",
                    "cappuccino", "latte", "mocha", "cold coffee",
                ],
                &[
                    "dates", "seed", "seeds", "chia seed", "sunflower seed", "pumpkin seed",
                    "flax seed",
                ],
            ]),
            invalid: flatten(&[
                MEAT,
                EGGS,
                &["paneer", "cheese", "butter", "cream", "curd", "yogurt", "yoghurt", "lassi"],
                &["milk ", " milk"],
                BAKERY,
                STAPLES,
                &["ghee"],
                FRESH_PRODUCE,
                &[
                    "whole spice", "whole spices", "masala", "spice", "spices", "turmeric",
                    "cumin", "coriander powder", "cardamom", "dry fruit", "dry fruits",
                ],
                NON_FOOD,
                NOISE,
            ]),
            exceptions: vec![KeywordException::new("butter", nut_butters)],
            accept_unmatched: false,
        },
        page_markers: to_strings(&["breakfast", "sauce", "cereal"]),
        subcategories: SubcategoryHints {
            keywords: to_strings(&[
                "breakfast cereal", "cereal", "cereals", "muesli", "oats", "ketchup", "sauce",
                "sauces", "honey", "spread", "spreads", "peanut butter", "peanut-butter",
                "peanutbutter", "butter", "batter", "batters", "breakfast mix", "tea", "coffee",
                "zepto cafe", "zepto-cafe", "cafe", "dates", "seeds",
            ]),
            excluded: flatten(&[SUB_EXCLUDED_STAPLES, &["milk", "bread", "bakery"]]),
            exceptions: vec![KeywordException::new(
                "butter",
                &["peanut butter", "peanut-butter"],
            )],
            path_tokens: to_strings(&[
                "breakfast", "sauce", "cereal", "muesli", "oats", "ketchup", "honey", "spread",
                "peanut", "batter", "tea", "coffee", "cafe", "dates", "seeds",
            ]),
        },
        breakdown: vec![
            BreakdownGroup::new("Cereals/Muesli/Oats", &["cereal", "muesli", "oats", "granola", "flakes"]),
            BreakdownGroup::new("Ketchup & Sauces/Dips", &["ketchup", "sauce", "schezwan", "dip", "mayonnaise"]),
            BreakdownGroup::new("Honey & Spreads", &["honey", "jam", "spread", "marmalade", "nutella"]),
            BreakdownGroup::new("Peanut Butter", &["peanut butter", "peanut-butter"]),
            BreakdownGroup::new("Batters & Mixes", &["batter", "mix", "pancake", "waffle"]),
            BreakdownGroup::new("Tea & Coffee", &["tea", "coffee", "hot chocolate"]),
        ],
    }
}

fn cold_drinks_juices() -> CategoryProfile {
    CategoryProfile {
        slug: "cold-drinks-juices".into(),
        title: "Cold Drinks & Juices".into(),
        url: "https://www.zepto.com/cn/cold-drinks-juices/cold-drinks-juices/cid/947a72ae-b371-45cb-ad3a-778c05b64399/scid/7dceec53-78f9-4f06-83d7-c8edd9c2f71a".into(),
        rule: CategoryRule {
            valid: flatten(&[
                &[
                    "soft drink", "soft drinks", "cola", "pepsi", "coca cola", "coca-cola", "coke",
                    "sprite", "fanta", "7up", "thums up", "limca", "mirinda", "soda", "sodas",
                ],
                &[
                    "tonic water", "tonic", "soda water", "club soda", "ginger ale", "ginger beer",
                    "mixer", "mixers", "schweppes",
                ],
                &[
                    "fruit juice", "fruit juices", "juice", "juices", "orange juice", "apple juice",
                    "mango juice", "pineapple juice", "cranberry juice", "grape juice",
                    "pomegranate juice", "guava juice", "fruit drink", "fruit drinks", "nectar",
                    "nectars", "real", "tropicana", "minute maid",
                ],
                &[
                    "cold coffee", "iced coffee", "ice coffee", "coffee drink", "coffee drinks",
                    "frappe", "frappes", "iced tea", "ice tea", "cold tea",
                ],
                &[
                    "energy drink", "energy drinks", "red bull", "monster", "powerade", "gatorade",
                    "electral",
                ],
                &[
                    "non-alcoholic", "non alcoholic", "mocktail", "mocktails", "virgin", "bira",
                ],
                &[
                    "water", "mineral water", "drinking water", "bisleri", "aquafina", "kinley",
                    "himalayan", "premium",
                ],
                &[
                    "hydration", "sports drink", "sports drinks", "electrolyte", "electrolytes",
                    "coconut water",
                ],
                &[
                    "milk drink", "milk drinks", "flavored milk", "flavoured milk", "lassi",
                    "buttermilk", "chaas", "milkshake", "milkshakes",
                ],
                &[
                    "vegan drink", "vegan drinks", "almond milk", "soy milk", "soya milk",
                    "oat milk", "coconut milk", "rice milk", "plant milk", "plant-based milk",
                    "so good",
                ],
                &[
                    "instant drink mix", "instant drink mixes", "drink mix", "drink mixes", "tang",
                    "rasna", "lemonade mix", "orange mix", "instant mix",
                ],
                &["kombucha", "kombuchas", "zepto cafe", "zepto-cafe", "cafe"],
            ]),
            invalid: flatten(&[
                MEAT,
                EGGS,
                &["paneer", "cheese", "butter", "cream", "curd", "yogurt", "yoghurt"],
                &["milk ", " milk", "fresh milk", "toned milk", "full cream milk"],
                BAKERY,
                STAPLES,
                &["ghee"],
                FRESH_PRODUCE,
                SPICES,
                CEREALS,
                SPREADS_AND_SAUCES,
                MAYO,
                PACKAGED,
                &[
                    "tea", "coffee", "green tea", "black tea", "chai", "instant coffee",
                    "coffee powder",
                ],
                &["frozen", "ice cream", "icecream", "ice-cream", "kulfi"],
                &["chocolate", "chocolates", "candy", "candies", "mithai"],
                NON_FOOD,
                NOISE,
            ]),
            exceptions: Vec::new(),
            accept_unmatched: false,
        },
        page_markers: to_strings(&["drink", "juice", "beverage"]),
        subcategories: SubcategoryHints {
            keywords: to_strings(&[
                "top picks", "soft drink", "soft drinks", "soda", "mixer", "mixers", "fruit juice",
                "fruit juices", "juice", "juices", "cold coffee", "iced coffee", "ice coffee",
                "energy drink", "energy drinks", "non-alcoholic", "non alcoholic", "water",
                "premium", "hydration", "milk drink", "milk drinks", "vegan drink", "vegan drinks",
                "instant drink mix", "instant drink mixes", "drink mix", "drink mixes", "kombucha",
                "zepto cafe", "zepto-cafe", "cafe",
            ]),
            excluded: to_strings(&[
                "meat", "fish", "egg", "eggs", "chicken", "mutton", "rice", "atta", "oil", "dal",
                "pulse", "fresh fruit", "fresh vegetable", "bread", "bakery", "biscuit",
                "biscuits", "cereal", "oats", "muesli", "sauce", "ketchup",
                "honey", "spread", "frozen", "ice cream", "icecream", "chocolate", "candy",
            ]),
            exceptions: Vec::new(),
            path_tokens: to_strings(&[
                "drink", "juice", "beverage", "soda", "cola", "energy", "water", "hydration",
                "milk", "vegan", "kombucha", "cafe",
            ]),
        },
        breakdown: vec![
            BreakdownGroup::new(
                "Soft Drinks",
                &["soft drink", "cola", "pepsi", "coca cola", "coke", "sprite", "fanta", "soda"],
            ),
            BreakdownGroup::new("Fruit Juices", &["juice", "juices", "fruit juice", "nectar"]),
            BreakdownGroup::new("Cold Coffee", &["cold coffee", "iced coffee", "frappe"]),
            BreakdownGroup::new(
                "Energy Drinks",
                &["energy drink", "red bull", "monster", "gatorade", "powerade"],
            ),
            BreakdownGroup::new("Water", &["water"]),
            BreakdownGroup::new(
                "Milk Drinks",
                &["milk drink", "flavored milk", "lassi", "buttermilk", "milkshake"],
            ),
            BreakdownGroup::new(
                "Vegan Drinks",
                &["vegan drink", "almond milk", "soy milk", "oat milk", "coconut milk", "plant milk"],
            ),
            BreakdownGroup::new("Instant Drink Mixes", &["drink mix", "instant mix", "tang", "rasna"]),
        ],
    }
}

fn frozen_foods() -> CategoryProfile {
    CategoryProfile {
        slug: "frozen-foods".into(),
        title: "Frozen Food".into(),
        url: "https://www.zepto.com/cn/frozen-food/frozen-food/cid/aae1447d-1403-4a5c-a65f-bcb3afb93b5e/scid/98beb18c-0205-4267-9a30-7a749bec1b63".into(),
        rule: CategoryRule {
            valid: flatten(&[
                &[
                    "frozen", "veg snack", "vegetable snack", "frozen snack", "frozen snacks",
                    "frozen potato", "frozen fries", "frozen smile", "frozen smiles", "smiles",
                    "fries",
                ],
                &[
                    "non veg snack", "non-veg snack", "frozen chicken", "frozen nuggets",
                    "frozen cutlet", "frozen cutlets", "frozen meat", "frozen fish",
                    "frozen seafood", "nuggets", "cutlet", "cutlets",
                ],
                &[
                    "frozen vegetable", "frozen vegetables", "frozen veggies", "frozen peas",
                    "frozen corn", "frozen beans", "frozen carrot", "frozen carrots",
                    "frozen cauliflower", "frozen broccoli",
                ],
                &[
                    "momo", "momos", "frozen momo", "frozen momos", "dumpling", "dumplings",
                    "frozen dumpling", "frozen dumplings",
                ],
                &[
                    "frozen roti", "frozen rotis", "frozen paratha", "frozen parathas",
                    "frozen naan", "frozen naans", "frozen chapati", "frozen chapatis",
                    "frozen flatbread", "frozen flatbreads",
                ],
                &["raw meat", "raw meats", "frozen raw"],
                &[
                    "sausage", "sausages", "salami", "salamis", "cold cut", "cold cuts",
                    "frozen sausage", "frozen salami", "bacon", "ham",
                ],
                &["plant based", "plant-based", "vegan meat", "mock meat"],
                &[
                    "party treat", "party treats", "frozen appetizer", "frozen appetizers",
                    "protein rich", "protein-rich", "frozen protein", "frozen food",
                    "frozen foods",
                ],
            ]),
            invalid: flatten(&[
                FRESH_PRODUCE,
                FRESH_PROTEIN,
                DAIRY,
                &["ice cream", "icecream", "ice-cream", "frozen dessert", "frozen desserts", "kulfi"],
                BAKERY,
                EGGS,
                STAPLES,
                SPICES,
                CEREALS,
                SPREADS_AND_SAUCES,
                MAYO,
                PACKAGED,
                &["baking mix", "dessert mix"],
                HOT_BEVERAGES,
                NON_FOOD,
                NOISE,
            ]),
            exceptions: Vec::new(),
            accept_unmatched: false,
        },
        page_markers: to_strings(&["frozen", "snack", "momo"]),
        subcategories: SubcategoryHints {
            keywords: to_strings(&[
                "veg snack", "vegetable snack", "non veg snack", "non-veg snack",
                "frozen vegetable", "frozen vegetables", "frozen veggies", "momo", "momos", "roti",
                "paratha", "parathas", "raw meat", "raw meats", "sausage", "sausages", "salami",
                "salamis", "cold cut", "cold cuts", "plant based", "plant-based", "party treat",
                "party treats", "protein rich", "protein-rich", "top deals", "top deal",
            ]),
            excluded: to_strings(&[
                "ice cream", "icecream", "kulfi", "fresh fruit", "fresh fruits",
                "fresh vegetable", "fresh vegetables", "milk", "bread", "bakery", "tea", "coffee",
                "cereal", "oats", "muesli",
            ]),
            exceptions: Vec::new(),
            path_tokens: to_strings(&[
                "frozen", "snack", "momo", "roti", "paratha", "sausage", "salami", "meat",
                "vegetable", "veggie", "veggies",
            ]),
        },
        breakdown: vec![
            BreakdownGroup::new(
                "Veg Snacks",
                &["veg snack", "vegetable snack", "frozen snack", "frozen potato", "frozen fries"],
            ),
            BreakdownGroup::new(
                "Non-Veg Snacks",
                &["non veg snack", "non-veg snack", "frozen chicken", "frozen nuggets", "frozen cutlet"],
            ),
            BreakdownGroup::new(
                "Frozen Veggies",
                &["frozen vegetable", "frozen vegetables", "frozen peas", "frozen corn"],
            ),
            BreakdownGroup::new("Momos & Dumplings", &["momo", "dumpling"]),
            BreakdownGroup::new(
                "Roti & Paratha",
                &["frozen roti", "frozen paratha", "frozen naan", "frozen chapati", "frozen flatbread"],
            ),
            BreakdownGroup::new("Raw Meats", &["raw meat"]),
            BreakdownGroup::new(
                "Sausages, Salami & Cold Cuts",
                &["sausage", "salami", "cold cut", "bacon", "ham"],
            ),
            BreakdownGroup::new(
                "Plant Based",
                &["plant based", "plant-based", "vegan meat", "mock meat"],
            ),
        ],
    }
}

/// The produce aisle shows nothing from other aisles, so every named card is kept
/// and only the main listing is scraped.
fn fruits_vegetables() -> CategoryProfile {
    CategoryProfile {
        slug: "fruits-vegetables".into(),
        title: "Fruits & Vegetables".into(),
        url: "https://www.zepto.com/cn/fruits-vegetables/fruits-vegetables/cid/64374cfe-d06f-4a01-898e-c07c46462c36/scid/e78a8422-5f20-4e4b-9a9f-22a0e53962e3".into(),
        rule: CategoryRule::accept_all(&[]),
        page_markers: to_strings(&["fruits", "vegetables"]),
        subcategories: SubcategoryHints::default(),
        breakdown: vec![
            BreakdownGroup::new(
                "Fresh Vegetables",
                &[
                    "onion", "tomato", "potato", "carrot", "capsicum", "cabbage", "cauliflower",
                    "brinjal", "beans", "cucumber", "okra", "bhindi", "gourd", "spinach", "palak",
                ],
            ),
            BreakdownGroup::new(
                "Fresh Fruits",
                &[
                    "banana", "apple", "orange", "mango", "grapes", "papaya", "pomegranate",
                    "watermelon", "guava", "pineapple", "kiwi", "pear",
                ],
            ),
            BreakdownGroup::new(
                "Herbs & Seasonings",
                &["coriander", "mint", "curry leaves", "ginger", "garlic", "lemon", "chilli"],
            ),
        ],
    }
}

fn meat_fish_eggs() -> CategoryProfile {
    CategoryProfile {
        slug: "meat-fish-eggs".into(),
        title: "Meat, Fish & Eggs".into(),
        url: "https://www.zepto.com/cn/meats-fish-eggs/meats-fish-eggs/cid/4654bd8a-fb30-4ee1-ab30-4bf581b6c6e3/scid/95157c69-f03e-48e5-ae2f-d947af34397f".into(),
        rule: CategoryRule {
            valid: to_strings(&[
                "chicken", "mutton", "lamb", "goat", "beef", "pork", "meat", "fish", "prawn",
                "shrimp", "crab", "lobster", "squid", "octopus", "seafood", "salmon", "tuna", "rohu",
                "katla", "pomfret", "bangda", "egg", "eggs", "sausage", "salami", "ham", "bacon",
                "cold cut", "cold cuts", "frozen meat", "frozen chicken", "frozen fish",
            ]),
            invalid: flatten(&[&["bread", "biryani", "kit"], &["incl. of all taxes", "buy ", "online"]]),
            exceptions: Vec::new(),
            accept_unmatched: false,
        },
        page_markers: to_strings(&["meat", "fish", "egg"]),
        subcategories: SubcategoryHints {
            keywords: to_strings(&[
                "chicken", "fish", "mutton", "egg", "eggs", "seafood", "prawn", "shrimp",
                "cold cut", "cold cuts", "sausage", "salami", "frozen meat", "lamb", "goat",
            ]),
            excluded: to_strings(&["marinade", "snack", "sauce", "spice", "masala", "bread", "biryani"]),
            exceptions: Vec::new(),
            path_tokens: to_strings(&["chicken", "fish", "mutton", "egg", "meat", "seafood"]),
        },
        breakdown: vec![
            BreakdownGroup::new("Chicken", &["chicken"]),
            BreakdownGroup::new(
                "Fish & Seafood",
                &[
                    "fish", "prawn", "shrimp", "crab", "seafood", "salmon", "tuna", "rohu", "katla",
                    "pomfret", "bangda",
                ],
            ),
            BreakdownGroup::new("Mutton/Lamb/Goat", &["mutton", "lamb", "goat"]),
            BreakdownGroup::new("Eggs", &["egg"]),
            BreakdownGroup::new(
                "Cold Cuts & Sausages",
                &["sausage", "salami", "ham", "bacon", "cold cut", "cold cuts"],
            ),
        ],
    }
}

fn packaged_food() -> CategoryProfile {
    CategoryProfile {
        slug: "packaged-food".into(),
        title: "Packaged Food".into(),
        url: "https://www.zepto.com/cn/packaged-food/packaged-food/cid/5736ad99-f589-4d58-a24b-a12222320a37/scid/dbb39a86-256b-4664-81ed-6668418a5436".into(),
        rule: CategoryRule {
            valid: flatten(&[
                &[
                    "noodle", "noodles", "instant noodle", "instant noodles", "maggi", "ramen",
                    "pasta", "macaroni", "penne", "fusilli", "spaghetti", "vermicelli",
                ],
                &["soup", "soups", "instant soup", "soup mix", "soup powder"],
                &[
                    "papad", "papads", "pappad", "pappads", "pickle", "pickles", "achaar",
                    "chutney", "chutneys", "mango pickle", "lime pickle", "mixed pickle",
                ],
                &[
                    "ready to cook", "ready-to-cook", "r2c", "instant mix", "instant mixes",
                    "dhokla mix", "idli mix", "dosa mix", "poha mix", "upma mix", "vada mix",
                    "gulab jamun mix", "halwa mix",
                ],
                &[
                    "ready to eat", "ready-to-eat", "rte", "instant food", "packed food",
                    "packaged food",
                ],
                &[
                    "baby food", "infant food", "toddler food", "cerelac", "lactogen",
                    "baby cereal", "infant cereal", "baby formula", "weaning food",
                ],
                &[
                    "baking mix", "baking mixes", "cake mix", "brownie mix", "cookie mix",
                    "muffin mix", "pancake mix", "waffle mix", "bread mix",
                ],
                &[
                    "dessert mix", "dessert mixes", "gulab jamun", "kheer mix", "halwa mix",
                    "payasam mix", "pudding mix", "custard mix",
                ],
                &[
                    "condensed milk", "milkmaid", "baking powder", "yeast", "vanilla extract",
                    "cocoa powder", "food mix", "food mixes",
                ],
            ]),
            invalid: flatten(&[
                FRESH_PRODUCE,
                FRESH_PROTEIN,
                DAIRY,
                BAKERY,
                EGGS,
                STAPLES,
                SPICES,
                CEREALS,
                SPREADS_AND_SAUCES,
                HOT_BEVERAGES,
                MEAT,
                NON_FOOD,
                NOISE,
            ]),
            exceptions: vec![
                KeywordException::new("milk ", &["condensed", "milkmaid"]),
                KeywordException::new(" milk", &["condensed", "milkmaid"]),
            ],
            accept_unmatched: false,
        },
        page_markers: to_strings(&["packaged", "food", "noodle", "pasta"]),
        subcategories: SubcategoryHints {
            keywords: to_strings(&[
                "top picks", "noodle", "noodles", "pasta", "soup", "soups", "papad", "papads",
                "pappad", "pappads", "pickle", "pickles", "achaar", "chutney", "chutneys", "baby",
                "toddler", "infant", "ready to cook", "ready-to-cook", "r2c", "ready to eat",
                "ready-to-eat", "rte", "baking mix", "baking mixes", "dessert mix",
                "dessert mixes", "instant mix", "instant mixes",
            ]),
            excluded: flatten(&[
                SUB_EXCLUDED_STAPLES,
                &["milk", "bread", "bakery", "cereal", "oats", "muesli"],
            ]),
            exceptions: Vec::new(),
            path_tokens: to_strings(&[
                "packaged", "food", "noodle", "pasta", "soup", "papad", "pickle", "baby",
                "toddler", "infant", "ready", "baking", "dessert", "mix",
            ]),
        },
        breakdown: vec![
            BreakdownGroup::new("Noodles", &["noodle"]),
            BreakdownGroup::new(
                "Pasta & Soups",
                &["pasta", "soup", "macaroni", "penne", "spaghetti"],
            ),
            BreakdownGroup::new(
                "Papads, Pickles & Chutneys",
                &["pickle", "achaar", "papad", "pappad", "chutney"],
            ),
            BreakdownGroup::new(
                "Ready to Cook",
                &["ready to cook", "ready-to-cook", "r2c", "instant mix"],
            ),
            BreakdownGroup::new("Ready to Eat", &["ready to eat", "ready-to-eat", "rte"]),
            BreakdownGroup::new("Baby & Toddler", &["baby", "toddler", "infant", "cerelac"]),
            BreakdownGroup::new(
                "Baking Mixes",
                &["baking mix", "baking powder", "yeast", "milkmaid", "condensed milk"],
            ),
            BreakdownGroup::new(
                "Dessert Mixes",
                &["dessert mix", "gulab jamun", "kheer mix", "halwa mix"],
            ),
        ],
    }
}

fn tea_coffee_more() -> CategoryProfile {
    CategoryProfile {
        slug: "tea-coffee-more".into(),
        title: "Tea, Coffee & More".into(),
        url: "https://www.zepto.com/cn/tea-coffee-more/tea-coffee-more/cid/d7e98d87-6850-4cf9-a37c-e4fa34ae302c/scid/e6763c2d-0bf3-4332-82e4-0c8df1c94cad".into(),
        rule: CategoryRule {
            valid: flatten(&[
                &[
                    "tea", "green tea", "black tea", "herbal tea", "chai", "ctc tea", "leaf tea",
                    "dust tea", "tea bags", "tea bag", "premium tea",
                ],
                &[
                    "coffee", "instant coffee", "filter coffee", "ground coffee", "coffee powder",
                    "coffee beans", "arabica", "robusta", "premium coffee",
                ],
                &[
                    "cold coffee", "iced coffee", "ice coffee", "cappuccino", "latte", "mocha",
                    "frappe",
                ],
                &[
                    "bournvita", "bourn vita", "complan", "horlicks", "boost", "pediasure",
                    "kids nutrition", "kids' nutrition", "children nutrition",
                ],
                &[
                    "ensure", "protinex", "adult nutrition", "nutrition drink", "nutrition drinks",
                    "health drink", "health drinks", "protein drink", "protein drinks",
                ],
                &[
                    "drink mix", "drink mixes", "hot chocolate", "chocolate drink", "malt drink",
                    "energy drink", "energy drinks",
                ],
                &["zepto cafe", "zepto-cafe", "cafe"],
            ]),
            invalid: flatten(&[
                FRESH_PRODUCE,
                FRESH_PROTEIN,
                DAIRY,
                BAKERY,
                EGGS,
                STAPLES,
                SPICES,
                CEREALS,
                SPREADS_AND_SAUCES,
                MAYO,
                PACKAGED,
                &["baking mix", "dessert mix"],
                MEAT,
                NON_FOOD,
                NOISE,
            ]),
            exceptions: Vec::new(),
            accept_unmatched: false,
        },
        page_markers: to_strings(&["tea", "coffee", "nutrition"]),
        subcategories: SubcategoryHints {
            keywords: to_strings(&[
                "tea", "coffee", "kids nutrition", "kids' nutrition", "adult nutrition",
                "green tea", "herbal tea", "cold coffee", "iced coffee", "premium coffee",
                "premium tea", "zepto cafe", "zepto-cafe", "cafe", "drink mix", "drink mixes",
                "nutrition drink", "nutrition drinks", "health drink", "health drinks",
            ]),
            excluded: flatten(&[
                SUB_EXCLUDED_STAPLES,
                &["milk", "bread", "bakery", "noodle", "pasta", "pickle", "papad"],
            ]),
            exceptions: Vec::new(),
            path_tokens: to_strings(&[
                "tea", "coffee", "nutrition", "cafe", "drink", "bournvita", "ensure", "complan",
                "horlicks",
            ]),
        },
        breakdown: vec![
            BreakdownGroup::new("Tea", &["tea"]),
            BreakdownGroup::new("Coffee", &["coffee"]),
            BreakdownGroup::new(
                "Kids Nutrition",
                &["bournvita", "complan", "horlicks", "boost", "pediasure", "kids"],
            ),
            BreakdownGroup::new("Adult Nutrition", &["ensure", "protinex", "adult nutrition"]),
            BreakdownGroup::new(
                "Cold Coffee",
                &["cold coffee", "iced coffee", "cappuccino", "latte", "mocha"],
            ),
            BreakdownGroup::new(
                "Drink Mixes",
                &["drink mix", "hot chocolate", "chocolate drink", "malt drink"],
            ),
        ],
    }
}
