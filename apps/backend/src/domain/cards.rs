use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

/// Q♠ — the pig; worth −100 to whoever collects it.
pub const PIG: Card = Card {
    suit: Suit::Spades,
    rank: Rank::Queen,
};

/// J♦ — the goat; worth +100.
pub const GOAT: Card = Card {
    suit: Suit::Diamonds,
    rank: Rank::Jack,
};

/// 10♣ — the doubler; ×2 on scoring cards, or +50 when collected alone.
pub const DOUBLER: Card = Card {
    suit: Suit::Clubs,
    rank: Rank::Ten,
};

impl Card {
    pub fn is_heart(self) -> bool {
        self.suit == Suit::Hearts
    }

    /// Whether this card contributes to a seat's score on its own
    /// (hearts, pig, goat). The doubler is deliberately excluded.
    pub fn is_scoring(self) -> bool {
        self.is_heart() || self == PIG || self == GOAT
    }
}

// Ord/Eq on Card is only for stable sorting: suit order C<D<H<S then rank.
// Trick resolution compares ranks within the led suit only.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.token(), self.suit.symbol())
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_card(&s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

/// Parse the wire token `<RANK><SUIT>` (e.g. `10♥`, `Q♠`).
///
/// This is the only textual form of a card; there is no separate binary
/// encoding.
pub fn parse_card(s: &str) -> Result<Card, DomainError> {
    let mut chars = s.chars();
    let Some(suit_ch) = chars.next_back() else {
        return Err(DomainError::parse_card(s));
    };
    let suit = match suit_ch {
        '♠' => Suit::Spades,
        '♥' => Suit::Hearts,
        '♣' => Suit::Clubs,
        '♦' => Suit::Diamonds,
        _ => return Err(DomainError::parse_card(s)),
    };
    let rank = match chars.as_str() {
        "2" => Rank::Two,
        "3" => Rank::Three,
        "4" => Rank::Four,
        "5" => Rank::Five,
        "6" => Rank::Six,
        "7" => Rank::Seven,
        "8" => Rank::Eight,
        "9" => Rank::Nine,
        "10" => Rank::Ten,
        "J" => Rank::Jack,
        "Q" => Rank::Queen,
        "K" => Rank::King,
        "A" => Rank::Ace,
        _ => return Err(DomainError::parse_card(s)),
    };
    Ok(Card { suit, rank })
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

#[cfg(test)]
pub fn parse_cards(tokens: &[&str]) -> Vec<Card> {
    tokens
        .iter()
        .map(|s| parse_card(s).expect("valid card token"))
        .collect()
}
