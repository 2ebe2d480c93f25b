//! The `/shop` command tree served by the shell.
//!
//! ```text
//! /shop (alias: s)
//! ├── list [all|admin|player] [page]
//! ├── give <player> <amount>          shop.give
//! ├── price <item> [price=...]
//! ├── reload                          shop.admin
//! └── whoami                          players only
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use parley_command::{CommandNode, CommandTree, Execution};
use parley_foundation::{Error, InvokerKind, Message, Result, Value};
use parley_parser::{
    ArgumentExt, FirstOfArgument, IntegerArgument, LiteralArgument, NameArgument, NameDirectory,
    StringArgument,
};

/// Listings shown per page by `/shop list`.
pub const PAGE_SIZE: usize = 4;

/// A single item offered for sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Owning player, or `None` for admin shops.
    pub owner: Option<String>,
    /// The item sold.
    pub item: String,
    /// Price per item.
    pub price: i64,
}

impl Listing {
    fn new(owner: Option<&str>, item: &str, price: i64) -> Self {
        Self {
            owner: owner.map(str::to_string),
            item: item.to_string(),
            price,
        }
    }
}

/// State mutated by the shop commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopState {
    /// Every listing, in creation order.
    pub listings: Vec<Listing>,
    /// Currency given to players.
    pub balances: BTreeMap<String, i64>,
}

impl Default for ShopState {
    fn default() -> Self {
        Self {
            listings: vec![
                Listing::new(None, "diamond", 100),
                Listing::new(None, "bread", 2),
                Listing::new(Some("Alice"), "apple", 3),
                Listing::new(Some("Bob"), "sword", 40),
            ],
            balances: BTreeMap::new(),
        }
    }
}

enum Target {
    All,
    Admin,
    Player(String),
}

impl Target {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => Self::All,
            Some(value) => match value.as_choice() {
                Some(("all", _)) => Self::All,
                Some(("admin", _)) => Self::Admin,
                Some((_, chosen)) => Self::Player(chosen.to_string()),
                None => Self::Player(value.to_string()),
            },
        }
    }

    fn includes(&self, listing: &Listing) -> bool {
        match self {
            Self::All => true,
            Self::Admin => listing.owner.is_none(),
            Self::Player(name) => listing
                .owner
                .as_deref()
                .is_some_and(|owner| owner.eq_ignore_ascii_case(name)),
        }
    }

    fn title(&self) -> String {
        match self {
            Self::All => "All shops".to_string(),
            Self::Admin => "Admin shops".to_string(),
            Self::Player(name) => format!("Shops of {name}"),
        }
    }
}

/// Builds the shop command tree.
///
/// `players` are the names accepted where a player is expected. The returned
/// state is shared with the executors.
///
/// # Errors
///
/// Returns an error if a command cannot be registered.
pub fn shop_commands(players: Vec<String>) -> Result<(CommandTree, Rc<RefCell<ShopState>>)> {
    let state = Rc::new(RefCell::new(ShopState::default()));
    let online: Arc<dyn NameDirectory> = Arc::new(players);

    let mut tree = CommandTree::new();
    let shop = tree.add_root(
        CommandNode::new("shop")
            .with_alias("s")
            .with_description("Browse and manage shops"),
    )?;

    let target = FirstOfArgument::new(
        "target",
        vec![
            LiteralArgument::new("all").boxed(),
            LiteralArgument::new("admin").boxed(),
            NameArgument::new("player", Arc::clone(&online)).boxed(),
        ],
    )
    .map_err(|e| Error::registration(e.to_string()))?;
    let shared = Rc::clone(&state);
    tree.add_child(
        shop,
        CommandNode::new("list")
            .with_description("Lists shops")
            .with_argument(target.or_invoker_name())
            .with_argument(IntegerArgument::positive("page").or_default_value(1))
            .with_executor(move |exec| list(exec, &shared.borrow())),
    )?;

    let shared = Rc::clone(&state);
    tree.add_child(
        shop,
        CommandNode::new("give")
            .with_description("Gives currency to a player")
            .with_permission("shop.give")
            .with_argument(NameArgument::new("player", Arc::clone(&online)))
            .with_argument(IntegerArgument::positive("amount"))
            .with_executor(move |exec| {
                let player = exec.get("player").map(ToString::to_string).unwrap_or_default();
                let amount = exec.get("amount").and_then(Value::as_int).unwrap_or_default();
                let mut state = shared.borrow_mut();
                let balance = state.balances.entry(player.clone()).or_default();
                *balance = balance.saturating_add(amount);
                exec.reply(&format!("Gave {amount} to {player}. Balance: {balance}."));
                Ok(())
            }),
    )?;

    let shared = Rc::clone(&state);
    tree.add_child(
        shop,
        CommandNode::new("price")
            .with_description("Shows or changes the price of an item")
            .with_argument(StringArgument::new("item"))
            .with_argument(IntegerArgument::new("price").with_min(0).named().optional())
            .with_executor(move |exec| price(exec, &mut shared.borrow_mut())),
    )?;

    let shared = Rc::clone(&state);
    tree.add_child(
        shop,
        CommandNode::new("reload")
            .with_description("Restores the initial listings")
            .with_permission("shop.admin")
            .with_executor(move |exec| {
                *shared.borrow_mut() = ShopState::default();
                exec.send(&Message::new("Finished {command}."));
                Ok(())
            }),
    )?;

    tree.add_child(
        shop,
        CommandNode::new("whoami")
            .with_description("Shows who you are")
            .accepting([InvokerKind::Player])
            .with_rejection_message("Only players can use {command}.")
            .with_executor(|exec| {
                exec.reply(&format!("You are {}.", exec.invoker().name()));
                Ok(())
            }),
    )?;

    Ok((tree, state))
}

fn list(exec: &Execution<'_>, state: &ShopState) -> Result<()> {
    let target = Target::from_value(exec.get("target"));
    let page = exec.get("page").and_then(Value::as_int).unwrap_or(1);
    let page = usize::try_from(page).unwrap_or(usize::MAX).max(1);

    let matching: Vec<&Listing> = state.listings.iter().filter(|l| target.includes(l)).collect();
    if matching.is_empty() {
        exec.reply("No shops found.");
        return Ok(());
    }

    let pages = matching.len().div_ceil(PAGE_SIZE);
    if page > pages {
        return Err(Error::failed(format!("Page {page} does not exist.")));
    }
    exec.reply(&format!("{} (page {page}/{pages}):", target.title()));
    for listing in matching.iter().skip((page - 1) * PAGE_SIZE).take(PAGE_SIZE) {
        exec.reply(&format!("- {} for {}", listing.item, listing.price));
    }
    Ok(())
}

fn price(exec: &Execution<'_>, state: &mut ShopState) -> Result<()> {
    let item = exec.get("item").map(ToString::to_string).unwrap_or_default();
    let Some(listing) = state
        .listings
        .iter_mut()
        .find(|l| l.item.eq_ignore_ascii_case(&item))
    else {
        return Err(Error::failed(format!("Unknown item: {item}")));
    };

    match exec.get("price").and_then(Value::as_int) {
        Some(price) => {
            listing.price = price;
            exec.reply(&format!("Price of {} set to {price}.", listing.item));
        }
        None => exec.reply(&format!("Price of {}: {}", listing.item, listing.price)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_command::Invocation;
    use parley_foundation::{Identity, MessageLog, NO_PERMISSION_MESSAGE};

    fn players() -> Vec<String> {
        vec!["Alice".to_string(), "Bob".to_string()]
    }

    fn run(invoker: &Identity, tokens: &[&str]) -> (Vec<String>, ShopState) {
        let (tree, state) = shop_commands(players()).unwrap_or_else(|e| panic!("{e}"));
        let root = tree.root("shop").unwrap_or_else(|| panic!("no root"));
        let log = MessageLog::new();
        tree.dispatch(&Invocation::new(invoker, root, "shop", tokens.iter().copied()), &log);
        let state = state.borrow().clone();
        (log.messages(), state)
    }

    #[test]
    fn root_alias_is_registered() {
        let (tree, _) = shop_commands(players()).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(tree.root("s"), tree.root("SHOP"));
        assert!(tree.root("s").is_some());
    }

    #[test]
    fn list_defaults_to_own_shops() {
        let (messages, _) = run(&Identity::player("Alice"), &["list"]);
        assert_eq!(messages, vec!["Shops of Alice (page 1/1):", "- apple for 3"]);
    }

    #[test]
    fn list_admin_and_all() {
        let (messages, _) = run(&Identity::player("Alice"), &["list", "admin"]);
        assert_eq!(
            messages,
            vec!["Admin shops (page 1/1):", "- diamond for 100", "- bread for 2"]
        );

        let (messages, _) = run(&Identity::console(), &["list", "all", "1"]);
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0], "All shops (page 1/1):");
    }

    #[test]
    fn list_other_player() {
        let (messages, _) = run(&Identity::player("Alice"), &["list", "bob"]);
        assert_eq!(messages, vec!["Shops of Bob (page 1/1):", "- sword for 40"]);
    }

    #[test]
    fn list_missing_page() {
        let (messages, _) = run(&Identity::console(), &["list", "all", "3"]);
        assert_eq!(messages, vec!["Page 3 does not exist."]);
    }

    #[test]
    fn give_requires_permission() {
        let (messages, state) = run(&Identity::player("Alice"), &["give", "Bob", "5"]);
        assert_eq!(messages, vec![NO_PERMISSION_MESSAGE]);
        assert!(state.balances.is_empty());

        let (messages, state) = run(&Identity::console(), &["give", "bob", "5"]);
        assert_eq!(messages, vec!["Gave 5 to Bob. Balance: 5."]);
        assert_eq!(state.balances.get("Bob"), Some(&5));
    }

    #[test]
    fn price_shows_and_sets() {
        let (messages, _) = run(&Identity::player("Bob"), &["price", "apple"]);
        assert_eq!(messages, vec!["Price of apple: 3"]);

        let (messages, state) = run(&Identity::player("Bob"), &["price", "Apple", "price=7"]);
        assert_eq!(messages, vec!["Price of apple set to 7."]);
        assert_eq!(state.listings[2].price, 7);

        let (messages, _) = run(&Identity::player("Bob"), &["price", "cake"]);
        assert_eq!(messages, vec!["Unknown item: cake"]);
    }

    #[test]
    fn reload_restores_state() {
        let (tree, state) = shop_commands(players()).unwrap_or_else(|e| panic!("{e}"));
        let root = tree.root("shop").unwrap_or_else(|| panic!("no root"));
        let log = MessageLog::new();
        let console = Identity::console();
        state.borrow_mut().listings.clear();
        tree.dispatch(&Invocation::new(&console, root, "shop", ["reload"]), &log);
        assert_eq!(log.last().as_deref(), Some("Finished /shop reload."));
        assert_eq!(*state.borrow(), ShopState::default());
    }

    #[test]
    fn whoami_is_for_players() {
        let (messages, _) = run(&Identity::player("Carol"), &["whoami"]);
        assert_eq!(messages, vec!["You are Carol."]);

        let (messages, _) = run(&Identity::console(), &["whoami"]);
        assert_eq!(messages, vec!["Only players can use /shop whoami."]);
    }
}
