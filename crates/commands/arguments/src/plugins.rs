//! One argument parser per argument type of the command tree.

use mcfunction_util::declare_and_pub_use;


// Roughly in the order of the `parser` ids they handle; `brigadier:` types first.
declare_and_pub_use! {
    boolean;
    numbers;
    string;

    swizzle;
    scoreboard;
    color;
    coordinates;
    block;
    nbt;
    resource_location;
    game_profile;
    component;
}
