/// Static catalog used by `bakeshop seed`. Prices are parsed as decimals at
/// seed time; slugs key the upserts so reseeding is idempotent.
pub struct SeedProduct {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub stock_quantity: i32,
    pub category: &'static str,
    pub image_urls: &'static [&'static str],
}

pub const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        slug: "butter-croissant",
        name: "Butter Croissant",
        description: "Classic laminated croissant with French butter.",
        price: "3.50",
        stock_quantity: 40,
        category: "Viennoiserie",
        image_urls: &["https://images.bakeshop.dev/butter-croissant.jpg"],
    },
    SeedProduct {
        slug: "pain-au-chocolat",
        name: "Pain au Chocolat",
        description: "Croissant dough wrapped around two dark chocolate batons.",
        price: "4.00",
        stock_quantity: 35,
        category: "Viennoiserie",
        image_urls: &["https://images.bakeshop.dev/pain-au-chocolat.jpg"],
    },
    SeedProduct {
        slug: "almond-croissant",
        name: "Almond Croissant",
        description: "Twice-baked croissant filled with frangipane.",
        price: "4.75",
        stock_quantity: 20,
        category: "Viennoiserie",
        image_urls: &["https://images.bakeshop.dev/almond-croissant.jpg"],
    },
    SeedProduct {
        slug: "sourdough-loaf",
        name: "Sourdough Loaf",
        description: "Naturally leavened country loaf, 48h fermentation.",
        price: "8.00",
        stock_quantity: 15,
        category: "Bread",
        image_urls: &["https://images.bakeshop.dev/sourdough-loaf.jpg"],
    },
    SeedProduct {
        slug: "baguette",
        name: "Baguette",
        description: "Traditional baguette, crisp crust and open crumb.",
        price: "3.25",
        stock_quantity: 50,
        category: "Bread",
        image_urls: &["https://images.bakeshop.dev/baguette.jpg"],
    },
    SeedProduct {
        slug: "rye-bread",
        name: "Rye Bread",
        description: "Dense dark rye with caraway seeds.",
        price: "6.50",
        stock_quantity: 12,
        category: "Bread",
        image_urls: &["https://images.bakeshop.dev/rye-bread.jpg"],
    },
    SeedProduct {
        slug: "lemon-tart",
        name: "Lemon Tart",
        description: "Shortcrust shell with lemon curd and torched meringue.",
        price: "5.50",
        stock_quantity: 18,
        category: "Patisserie",
        image_urls: &["https://images.bakeshop.dev/lemon-tart.jpg"],
    },
    SeedProduct {
        slug: "eclair-coffee",
        name: "Coffee Eclair",
        description: "Choux pastry with coffee creme patissiere.",
        price: "4.50",
        stock_quantity: 24,
        category: "Patisserie",
        image_urls: &["https://images.bakeshop.dev/eclair-coffee.jpg"],
    },
    SeedProduct {
        slug: "canele",
        name: "Canele",
        description: "Bordeaux-style canele with rum and vanilla.",
        price: "3.75",
        stock_quantity: 30,
        category: "Patisserie",
        image_urls: &["https://images.bakeshop.dev/canele.jpg"],
    },
    SeedProduct {
        slug: "cold-brew-coffee",
        name: "Cold Brew Coffee",
        description: "House blend, steeped 18 hours.",
        price: "4.25",
        stock_quantity: 60,
        category: "Cold Drinks",
        image_urls: &["https://images.bakeshop.dev/cold-brew-coffee.jpg"],
    },
];
