use balanced_maps::avl_tree::AvlMap;
use balanced_maps::red_black_tree::RedBlackMap;
use serde_derive::{Deserialize, Serialize};
use serde_test::{assert_tokens, Token};

#[derive(Debug, Deserialize, PartialEq, Serialize)]
struct Inventory {
    stock: AvlMap<String, u32>,
    prices: RedBlackMap<u32, u64>,
}

#[test]
fn int_test_derived_struct() {
    let mut inventory = Inventory {
        stock: AvlMap::new(),
        prices: RedBlackMap::new(),
    };
    inventory.stock.insert(String::from("pear"), 3).unwrap();
    inventory.stock.insert(String::from("apple"), 5).unwrap();
    inventory.prices.insert(20, 999).unwrap();
    inventory.prices.insert(10, 150).unwrap();

    assert_tokens(
        &inventory,
        &[
            Token::Struct {
                name: "Inventory",
                len: 2,
            },
            Token::Str("stock"),
            Token::Map { len: Some(2) },
            Token::Str("apple"),
            Token::U32(5),
            Token::Str("pear"),
            Token::U32(3),
            Token::MapEnd,
            Token::Str("prices"),
            Token::Map { len: Some(2) },
            Token::U32(10),
            Token::U64(150),
            Token::U32(20),
            Token::U64(999),
            Token::MapEnd,
            Token::StructEnd,
        ],
    );
}
